use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    //  Environment variable parameter - the distributed directory
    let staging_dir = env::var("TRUNK_STAGING_DIR").unwrap();

    //  Using the configured html output name (set in Trunk.toml)
    let staged_html_path = PathBuf::from(staging_dir).join("index.html");

    let html_change = fs::read_to_string(&staged_html_path).unwrap();

    // Relative paths so the build can be served from a sub-directory.
    let html_change = html_change
        .replace("/portfolio-engine.js", "./portfolio-engine.js")
        .replace("/portfolio-engine_bg.wasm", "./portfolio-engine_bg.wasm");

    fs::write(staged_html_path, html_change).unwrap();
}
