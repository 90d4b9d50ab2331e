use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(p) = stack.pop() {
        let entries = match fs::read_dir(&p) {
            Ok(e) => e,
            Err(_) => continue,
        };
        for ent in entries.flatten() {
            let path = ent.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

#[test]
fn kbqa_core_stays_network_free() {
    // Offline answers must never be able to reach a model service.
    let core_src = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../kbqa_core/src");
    let files = collect_rs_files(&core_src);
    assert!(!files.is_empty());

    for f in files {
        let text = fs::read_to_string(&f).unwrap_or_default();
        for forbidden in ["ureq::", "std::net::", "reqwest::"] {
            assert!(
                !text.contains(forbidden),
                "network dependency {forbidden} found in {}",
                f.display()
            );
        }
    }
}

#[test]
fn kbqa_core_manifest_has_no_http_client() {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../kbqa_core/Cargo.toml");
    let text = fs::read_to_string(manifest).expect("manifest");
    assert!(!text.contains("ureq"));
    assert!(!text.contains("reqwest"));
}

#[test]
fn only_the_client_module_talks_http() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    for f in collect_rs_files(&src_root) {
        let text = fs::read_to_string(&f).unwrap_or_default();
        if f.ends_with("openai.rs") {
            continue;
        }
        assert!(
            !text.contains("ureq::post") && !text.contains("ureq::get") && !text.contains(".agent"),
            "direct HTTP call outside the client in {}",
            f.display()
        );
    }
}
