//! End-to-end tests for the organize pipeline
//!
//! Each test builds a source tree in a temp directory, runs the
//! organizer against it, and checks the copied files and manifest.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use mobparts::organize::Organizer;
use serde_json::Value;
use tempfile::TempDir;

fn create_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    File::create(&path)
        .unwrap()
        .write_all(contents.as_bytes())
        .unwrap();
}

/// Run the organizer and return (manifest json, out root).
fn organize(src: &Path, mob: &str, out: &Path) -> (Value, PathBuf) {
    let report = Organizer::new(src, mob)
        .with_out_root(out)
        .run()
        .unwrap();
    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(&report.manifest_path).unwrap()).unwrap();
    (manifest, out.to_path_buf())
}

#[test]
fn default_only_part_resolves_to_default_entry() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg>head</svg>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["variants"]["Default"]["parts"]["Head"],
        "../Roc/Head/Default.svg"
    );
    let copied = out.join("Roc/Head/Default.svg");
    assert_eq!(
        fs::read(&copied).unwrap(),
        fs::read(src.join("Head/Head.svg")).unwrap()
    );
}

#[test]
fn variant_and_default_both_present_and_distinct() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg>plain</svg>");
    create_file(&src, "Head_Red/Head_Red.svg", "<svg>red</svg>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["variants"]["Default"]["parts"]["Head"],
        "../Roc/Head/Default.svg"
    );
    assert_eq!(
        manifest["variants"]["Red"]["parts"]["Head"],
        "../Roc/Head/Red.svg"
    );
    let default_bytes = fs::read(out.join("Roc/Head/Default.svg")).unwrap();
    let red_bytes = fs::read(out.join("Roc/Head/Red.svg")).unwrap();
    assert_ne!(default_bytes, red_bytes);
}

#[test]
fn missing_variant_file_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg>head</svg>");
    // The Red variant exists as a directory, but carries no Head_Red.svg.
    fs::create_dir_all(src.join("Head_Red")).unwrap();

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["variants"]["Red"]["parts"]["Head"],
        "../Roc/Head/Red.svg"
    );
    assert_eq!(
        fs::read(out.join("Roc/Head/Red.svg")).unwrap(),
        fs::read(src.join("Head/Head.svg")).unwrap()
    );
}

#[test]
fn animation_frames_are_copied_and_listed() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "TalonPowerOn/TalonPowerOn_1.svg", "<svg>f1</svg>");
    create_file(&src, "TalonPowerOn/TalonPowerOn_2.svg", "<svg>f2</svg>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    let frames = manifest["animations"]["TalonPowerOn"]["Default"]
        .as_array()
        .unwrap();
    assert_eq!(
        frames,
        &[
            "../Roc/TalonPowerOn/Default/Frame_1.svg",
            "../Roc/TalonPowerOn/Default/Frame_2.svg"
        ]
    );
    assert_eq!(
        fs::read(out.join("Roc/TalonPowerOn/Default/Frame_1.svg")).unwrap(),
        b"<svg>f1</svg>"
    );
    assert_eq!(
        fs::read(out.join("Roc/TalonPowerOn/Default/Frame_2.svg")).unwrap(),
        b"<svg>f2</svg>"
    );
}

#[test]
fn frames_are_ordered_numerically_not_lexically() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "TalonPowerOff/TalonPowerOff_10.svg", "<svg/>");
    create_file(&src, "TalonPowerOff/TalonPowerOff_2.svg", "<svg/>");

    let (manifest, _) = organize(&src, "Roc", &temp.path().join("out"));
    let frames = manifest["animations"]["TalonPowerOff"]["Default"]
        .as_array()
        .unwrap();
    assert_eq!(
        frames,
        &[
            "../Roc/TalonPowerOff/Default/Frame_2.svg",
            "../Roc/TalonPowerOff/Default/Frame_10.svg"
        ]
    );
}

#[test]
fn animation_variant_buckets_are_registered() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "TalonPowerOn/TalonPowerOn_1.svg", "<svg>base</svg>");
    create_file(
        &src,
        "TalonPowerOn_Red/TalonPowerOn_Red_1.svg",
        "<svg>red</svg>",
    );

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["animations"]["TalonPowerOn"]["Default"][0],
        "../Roc/TalonPowerOn/Default/Frame_1.svg"
    );
    assert_eq!(
        manifest["animations"]["TalonPowerOn"]["Red"][0],
        "../Roc/TalonPowerOn/Red/Frame_1.svg"
    );
    assert_eq!(
        fs::read(out.join("Roc/TalonPowerOn/Red/Frame_1.svg")).unwrap(),
        b"<svg>red</svg>"
    );
}

#[test]
fn effects_are_copied_without_variants() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Swoosh01/Swoosh01_1.svg", "<svg>s</svg>");
    create_file(&src, "Web/Web_1.svg", "<svg>w</svg>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["effects"]["Swoosh01"][0],
        "../Roc/Swoosh01/Frame_1.svg"
    );
    assert_eq!(manifest["effects"]["Web"][0], "../Roc/Web/Frame_1.svg");
    assert!(out.join("Roc/Swoosh01/Frame_1.svg").is_file());
    assert!(out.join("Roc/Web/Frame_1.svg").is_file());
}

#[test]
fn passthrough_files_keep_their_names() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "_Animation/IdleLoop.svg", "<svg>idle</svg>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert_eq!(
        manifest["_Animation"]["files"][0],
        "../Roc/_Animation/IdleLoop.svg"
    );
    assert_eq!(
        fs::read(out.join("Roc/_Animation/IdleLoop.svg")).unwrap(),
        b"<svg>idle</svg>"
    );
}

#[test]
fn define_sprite_directories_are_ignored() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg/>");
    create_file(&src, "DefineSpriteFoo/1.svg", "<svg/>");

    let (manifest, out) = organize(&src, "Roc", &temp.path().join("out"));
    assert!(!out.join("Roc/DefineSpriteFoo").exists());
    let json = serde_json::to_string(&manifest).unwrap();
    assert!(!json.contains("DefineSpriteFoo"));
}

#[test]
fn default_variant_exists_even_without_variant_files() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg/>");

    let (manifest, _) = organize(&src, "Roc", &temp.path().join("out"));
    let variants = manifest["variants"].as_object().unwrap();
    assert_eq!(variants.len(), 1);
    assert!(variants.contains_key("Default"));
}

#[test]
fn manifest_lands_in_json_dir_with_lowercased_name() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg/>");

    let out = temp.path().join("out");
    let report = Organizer::new(&src, "ThunderGolem")
        .with_out_root(&out)
        .run()
        .unwrap();
    assert_eq!(
        report.manifest_path,
        out.join("JSON/body_thundergolem.json")
    );
    assert!(report.manifest_path.is_file());
}

#[test]
fn rerun_is_idempotent_apart_from_created_date() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    create_file(&src, "Head/Head.svg", "<svg>head</svg>");
    create_file(&src, "Head_Red/Head_Red.svg", "<svg>red</svg>");
    create_file(&src, "TalonPowerOn/TalonPowerOn_1.svg", "<svg>f1</svg>");
    create_file(&src, "Web/Web_1.svg", "<svg>w</svg>");
    create_file(&src, "_Animation/Idle.svg", "<svg>i</svg>");

    let out = temp.path().join("out");
    let first = Organizer::new(&src, "Roc").with_out_root(&out).run().unwrap();
    let first_head = fs::read(out.join("Roc/Head/Default.svg")).unwrap();
    let mut first_manifest: Value =
        serde_json::from_str(&fs::read_to_string(&first.manifest_path).unwrap()).unwrap();

    let second = Organizer::new(&src, "Roc").with_out_root(&out).run().unwrap();
    let second_head = fs::read(out.join("Roc/Head/Default.svg")).unwrap();
    let mut second_manifest: Value =
        serde_json::from_str(&fs::read_to_string(&second.manifest_path).unwrap()).unwrap();

    assert_eq!(first_head, second_head);
    first_manifest["metadata"]["created"] = Value::Null;
    second_manifest["metadata"]["created"] = Value::Null;
    assert_eq!(first_manifest, second_manifest);
}
