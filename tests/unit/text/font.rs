use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("covergen_font_{tag}_{}_{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn magic_bytes_identify_font_files() {
    assert!(looks_like_font(&[0x00, 0x01, 0x00, 0x00, 0xff]));
    assert!(looks_like_font(b"OTTO...."));
    assert!(looks_like_font(b"ttcf"));
    assert!(!looks_like_font(b"\x89PNG"));
    assert!(!looks_like_font(b"OT"));
}

#[test]
fn missing_candidates_fall_back_to_builtin() {
    let dir = temp_dir("missing");
    let set = FontSet::resolve(&[dir.join("nope.ttf")], 48.0, 24.0, true).unwrap();
    assert!(set.title.is_builtin());
    assert!(set.body.is_builtin());
    assert_eq!(set.title.size_px(), 48.0);
    assert_eq!(set.body.size_px(), 24.0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn disabled_fallback_is_a_configuration_error() {
    let dir = temp_dir("nofallback");
    let bogus = dir.join("bogus.ttf");
    std::fs::write(&bogus, b"not a font").unwrap();
    let err = FontSet::resolve(&[bogus], 48.0, 24.0, false).unwrap_err();
    assert!(matches!(err, CovergenError::Configuration(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/fonts/DejaVuSansMono.ttf"
);

#[test]
fn first_usable_candidate_wins() {
    let dir = temp_dir("first");
    let junk = dir.join("junk.ttf");
    std::fs::write(&junk, b"nope").unwrap();
    let good = PathBuf::from(FIXTURE);
    let set = FontSet::resolve(&[junk, good.clone()], 40.0, 20.0, false).unwrap();
    match set.title.source() {
        GlyphSource::Outline { path, bytes } => {
            assert_eq!(path, &good);
            assert_eq!(bytes.len() as u64, std::fs::metadata(&good).unwrap().len());
        }
        GlyphSource::Builtin => panic!("expected outline source"),
    }
    assert_eq!(set.body.line_height(), 25.0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn truncated_font_is_skipped_for_next_candidate() {
    let dir = temp_dir("truncated");
    let bytes = std::fs::read(FIXTURE).unwrap();
    let truncated = dir.join("truncated.ttf");
    std::fs::write(&truncated, &bytes[..64]).unwrap();
    assert!(looks_like_font(&bytes[..64]));
    assert!(!registers_families(&bytes[..64]));
    assert!(registers_families(&bytes));

    let good = PathBuf::from(FIXTURE);
    let set = FontSet::resolve(&[truncated.clone(), good.clone()], 48.0, 24.0, false).unwrap();
    match set.title.source() {
        GlyphSource::Outline { path, .. } => assert_eq!(path, &good),
        GlyphSource::Builtin => panic!("expected outline source"),
    }

    let alone = FontSet::resolve(std::slice::from_ref(&truncated), 48.0, 24.0, true).unwrap();
    assert!(alone.title.is_builtin());
    let err = FontSet::resolve(&[truncated], 48.0, 24.0, false).unwrap_err();
    assert!(matches!(err, CovergenError::Configuration(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn magic_only_header_is_not_a_font() {
    let dir = temp_dir("header");
    let header = dir.join("header.ttf");
    std::fs::write(&header, [0x00, 0x01, 0x00, 0x00, 0x00, 0x00]).unwrap();
    assert!(FontSet::resolve(&[header], 40.0, 20.0, true).unwrap().title.is_builtin());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_non_positive_sizes() {
    assert!(FontSet::resolve(&[], 0.0, 24.0, true).is_err());
    assert!(FontSet::resolve(&[], 48.0, f32::NAN, true).is_err());
}

#[test]
fn default_candidates_are_ordered_by_platform() {
    let c = default_candidates();
    assert_eq!(c[0], PathBuf::from("/System/Library/Fonts/PingFang.ttc"));
    assert_eq!(
        c.last().unwrap(),
        &PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")
    );
}
