use std::fs;

use linelog::Logger;

#[test]
fn facade_routes_into_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facade.log");
    linelog::init_global(Logger::create(&path).unwrap()).unwrap();

    log::info!("listener ready on {}", 8080);
    log::debug!("noisy detail");
    log::warn!("low disk space");
    log::error!("bind failed");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("]-[info]-[facade] listener ready on 8080\n"));
    assert!(contents.contains("]-[debug]-[facade] noisy detail\n"));
    // warn folds into info
    assert!(contents.contains("]-[info]-[facade] low disk space\n"));
    assert!(contents.contains("]-[error]-[facade] bind failed\n"));
    assert_eq!(contents.matches('\n').count(), 4);
}
