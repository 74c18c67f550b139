mod common;

use revcat::{Config, Revision};
use std::path::Path;

#[test]
fn config_read_fixture() {
    let conf = Config::read(Path::new("tests/fixtures/revcat.yml")).unwrap();
    assert!(conf.verify().is_ok());
    assert!(conf.controller.enableVarLogCollection);
    assert_eq!(conf.network.istioOutboundIPRanges, "10.0.0.0/8,192.168.0.0/16");
    assert_eq!(conf, common::config(true, "10.0.0.0/8,192.168.0.0/16"));
}

#[test]
fn config_missing_file() {
    assert!(Config::read(Path::new("tests/fixtures/nope.yml")).is_err());
}

#[test]
fn revision_read_fixture() {
    let rev = Revision::read(Path::new("tests/fixtures/revision.yml")).unwrap();
    assert_eq!(rev.name(), "hello-00001");
    assert_eq!(rev.namespace(), "default");
    assert_eq!(rev.owning_configuration_name(), "hello");
    assert_eq!(rev.spec.service_account_name.as_ref().unwrap(), "builder");
    assert_eq!(rev.spec.container.image.as_ref().unwrap(), "gcr.io/example/app:v1");
}
