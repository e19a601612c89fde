use folder_levelup::config::load_config_from_xml_path;
use std::fs;
use tempfile::tempdir;

#[test]
fn malformed_xml_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    // Missing closing tag for last_root
    let xml = r#"<config>
  <last_root>/tmp/A
  <conflict_mode>skip</conflict_mode>
</config>"#;
    fs::write(&cfg_path, xml).unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><target_dir>/x</target_dir></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn missing_file_names_the_path() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("absent.xml");
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("read config xml"));
}
