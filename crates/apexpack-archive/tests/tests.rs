use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use apexpack_archive::{APEX_PUBKEY, ApexContainer, ContainerKind, ORIGINAL_APEX};
use zip::write::SimpleFileOptions;

fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start member");
        writer.write_all(data).expect("Failed to write member");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

fn write_file(path: &Path, bytes: &[u8]) {
    File::create(path)
        .and_then(|mut f| f.write_all(bytes))
        .expect("Failed to write fixture");
}

#[test]
fn capex_normalizes_to_readable_apex() {
    let temp_dir = tempfile::Builder::new()
        .prefix("apexpack-test-capex-")
        .tempdir()
        .expect("Failed to create temp dir");

    let inner = zip_bytes(&[(APEX_PUBKEY, b"pubkey"), ("apex_payload.img", b"erofs")]);
    let capex_path = temp_dir.path().join("com.android.art.capex");
    write_file(
        &capex_path,
        &zip_bytes(&[("apex_manifest.pb", b"manifest"), (ORIGINAL_APEX, &inner)]),
    );

    let name = capex_path.file_name().unwrap().to_string_lossy();
    assert_eq!(ContainerKind::from_file_name(&name), Some(ContainerKind::Capex));

    let apex_path = temp_dir.path().join("com.android.art.apex");
    let mut capex = ApexContainer::open(&capex_path).expect("Failed to open capex");
    capex
        .extract_member(ORIGINAL_APEX, &apex_path)
        .expect("Failed to extract original_apex");

    let out = temp_dir.path().join("com.android.art");
    fs::create_dir(&out).unwrap();
    let mut apex = ApexContainer::open(&apex_path).expect("Failed to open normalized apex");
    assert!(matches!(
        apex.extract_member(ORIGINAL_APEX, &temp_dir.path().join("nested.apex")),
        Err(apexpack_archive::Error::MemberNotFound { .. })
    ));
    let key = apex
        .extract_member_into(APEX_PUBKEY, &out)
        .expect("Failed to extract apex_pubkey");

    assert_eq!(fs::read(key).unwrap(), b"pubkey");
}
