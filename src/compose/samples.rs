//! Demo datasets matching the tables the article pipeline shipped with.

use crate::compose::comparison::{ComparisonData, Series};
use crate::compose::dashboard::{DashboardData, Datum};
use crate::compose::flow::FlowData;
use crate::compose::grid::GridData;
use crate::compose::job::{Recipe, RecipeKind};

/// Tool A vs tool B over four criteria, scored out of 10.
pub fn comparison() -> ComparisonData {
    ComparisonData {
        categories: ["易用性", "功能性", "价格", "支持"].map(String::from).to_vec(),
        series: vec![
            Series {
                name: "工具A".to_owned(),
                values: vec![8.0, 9.0, 6.0, 7.0],
            },
            Series {
                name: "工具B".to_owned(),
                values: vec![7.0, 8.0, 9.0, 8.0],
            },
        ],
        max: Some(10.0),
    }
}

/// Weekly tool-type shares and popularity ranking.
pub fn dashboard() -> DashboardData {
    DashboardData {
        shares: vec![
            Datum::new("对话AI", 35.0),
            Datum::new("图像生成", 25.0),
            Datum::new("文档处理", 20.0),
            Datum::new("代码助手", 15.0),
            Datum::new("其他", 5.0),
        ],
        ranking: vec![
            Datum::new("ChatGPT", 95.0),
            Datum::new("Midjourney", 88.0),
            Datum::new("Claude", 82.0),
            Datum::new("Notion AI", 76.0),
            Datum::new("GitHub Copilot", 71.0),
        ],
        pie_title: Some("本周热门AI工具类型分布".to_owned()),
        bars_title: Some("本周AI工具热度排行".to_owned()),
        max: Some(100.0),
    }
}

/// Four onboarding steps.
pub fn flow() -> FlowData {
    FlowData {
        steps: ["注册账号", "安装工具", "配置设置", "开始使用"].map(String::from).to_vec(),
    }
}

/// Six headline features.
pub fn grid() -> GridData {
    GridData {
        items: [
            "🤖 智能对话",
            "📝 文档处理",
            "🎨 创意生成",
            "📊 数据分析",
            "🔍 信息搜索",
            "⚡ 快速响应",
        ]
        .map(String::from)
        .to_vec(),
    }
}

/// Sample recipe for `kind`; covers carry no dataset.
pub fn recipe(kind: RecipeKind) -> Recipe {
    match kind {
        RecipeKind::Cover => Recipe::Cover,
        RecipeKind::Comparison => Recipe::Comparison(comparison()),
        RecipeKind::Dashboard => Recipe::Dashboard(dashboard()),
        RecipeKind::Flow => Recipe::Flow(flow()),
        RecipeKind::Grid => Recipe::Grid(grid()),
    }
}

/// Heading the sample illustrations were published with.
pub fn heading(kind: RecipeKind) -> &'static str {
    match kind {
        RecipeKind::Comparison => "AI工具对比分析",
        RecipeKind::Grid => "核心功能一览",
        RecipeKind::Cover | RecipeKind::Dashboard | RecipeKind::Flow => "",
    }
}
