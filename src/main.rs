use tracing::info;

use luahost::{HostConfig, ScriptHost};

fn main() {
    // Load configuration
    let config = match HostConfig::load("luahost.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load luahost.toml: {e}");
            eprintln!("Using default configuration.");
            HostConfig::default()
        }
    };

    // Initialize logging
    if let Err(e) = luahost::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        luahost::logging::init_console_only(&config.logging.level);
    }

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("Usage: luahost <script.lua> [more.lua ...]");
        std::process::exit(2);
    }

    let host = ScriptHost::new().with_config(&config);

    info!("Running {} script file(s)", files.len());
    let ok = if files.len() == 1 {
        host.run_file(&files[0])
    } else {
        host.run_files(&files)
    };

    if !ok {
        std::process::exit(1);
    }
}
