//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use std::path::PathBuf;

    env_logger::init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let (scene, config) = match args.as_slice() {
        [scene] => (scene, None),
        [scene, config] => (scene, Some(config.as_path())),
        _ => {
            eprintln!("usage: inkboard <scene.json> [config.json]");
            std::process::exit(2);
        }
    };

    let result = inkboard_app::export_file(scene, config).and_then(|export| {
        export.write_svg(&mut std::io::stdout().lock())?;
        Ok(export)
    });
    match result {
        Ok(export) => log::info!(
            "Exported {} shapes ({} skipped)",
            export.report.imported,
            export.report.skipped
        ),
        Err(e) => {
            log::error!("{e}");
            eprintln!("inkboard: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
