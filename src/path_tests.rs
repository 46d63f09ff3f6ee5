use super::*;

#[test]
fn normalize_strips_redundant_slashes() {
    assert_eq!(normalize("a/b/c").unwrap(), "a/b/c");
    assert_eq!(normalize("/a/b/").unwrap(), "a/b");
    assert_eq!(normalize("a//b").unwrap(), "a/b");
    assert_eq!(normalize("///").unwrap(), "");
    assert_eq!(normalize("").unwrap(), "");
}

#[test]
fn normalize_rejects_dot_segments() {
    assert!(normalize("a/./b").is_err());
    assert!(normalize("../a").is_err());
    assert!(normalize(".").is_err());
}

#[test]
fn normalize_is_idempotent() {
    for input in ["", "a", "a/b/c", "/a//b/", "x/y"] {
        let once = normalize(input).unwrap();
        assert_eq!(normalize(&once).unwrap(), once);
    }
}

#[test]
fn cut_full_window_is_whole_path() {
    let slice = PathSlice::cut("a/b/c/d", 0, 0);
    assert_eq!(slice.slice(), "a/b/c/d");
    assert_eq!(slice.reassemble(), "a/b/c/d");
}

#[test]
fn cut_positive_window() {
    let slice = PathSlice::cut("a/b/c/d", 1, 3);
    assert_eq!(slice.slice(), "b/c");
    assert_eq!(slice.reassemble(), "a/b/c/d");
}

#[test]
fn cut_negative_stop_counts_from_end() {
    let slice = PathSlice::cut("a/b/c/d", 1, -1);
    assert_eq!(slice.slice(), "b/c");
}

#[test]
fn cut_negative_start_selects_tail() {
    let slice = PathSlice::cut("a/b/c/d", -1, 0);
    assert_eq!(slice.slice(), "d");
    assert_eq!(slice.reassemble(), "a/b/c/d");
}

#[test]
fn cut_out_of_range_clamps() {
    let slice = PathSlice::cut("a/b", 0, 10);
    assert_eq!(slice.slice(), "a/b");
    let slice = PathSlice::cut("a/b", -10, 0);
    assert_eq!(slice.slice(), "a/b");
}

#[test]
fn cut_inverted_window_is_empty_slice() {
    let slice = PathSlice::cut("a/b/c/d", 3, 1);
    assert_eq!(slice.slice(), "");
    // Reassembly must still recover the full path.
    assert_eq!(slice.reassemble(), "a/b/c/d");
}

#[test]
fn cut_root_path() {
    let slice = PathSlice::cut("", 0, 0);
    assert_eq!(slice.slice(), "");
    assert_eq!(slice.reassemble(), "");
}

#[test]
fn cut_reassemble_round_trips() {
    for path in ["", "a", "a/b", "a/b/c/d/e"] {
        for start in -3..3 {
            for stop in -3..3 {
                let slice = PathSlice::cut(path, start, stop);
                assert_eq!(slice.reassemble(), path, "path={path} [{start}:{stop}]");
            }
        }
    }
}

#[test]
fn splice_replaces_window() {
    let slice = PathSlice::cut("a/b/c/d", 1, 3);
    assert_eq!(slice.splice("x/y/z").unwrap(), "a/x/y/z/d");
    assert_eq!(slice.splice("").unwrap(), "a/d");
}

#[test]
fn splice_normalizes_result() {
    let slice = PathSlice::cut("a/b", 1, 0);
    assert_eq!(slice.splice("x//y/").unwrap(), "a/x/y");
    assert!(slice.splice("../x").is_err());
}

#[test]
fn expand_template_substitutes_groups() {
    let captures = vec!["a/b.csv".to_string(), "a/b".to_string()];
    assert_eq!(
        expand_template("\\1.csv.meta", &captures).unwrap(),
        "a/b.csv.meta"
    );
    assert_eq!(expand_template("\\0", &captures).unwrap(), "a/b.csv");
    assert_eq!(expand_template("plain", &captures).unwrap(), "plain");
}

#[test]
fn expand_template_escapes_backslash() {
    let captures = vec![String::new()];
    assert_eq!(expand_template("a\\\\b", &captures).unwrap(), "a\\b");
}

#[test]
fn expand_template_rejects_missing_group() {
    let captures = vec!["x".to_string()];
    assert!(expand_template("\\3", &captures).is_err());
    assert!(expand_template("tail\\", &captures).is_err());
}
