//! Build script for tessera-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and writes it out as Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tessera_core::config::{PanelConfig, MAX_FPS};

/// GPIOs usable on the RP2040
const GPIO_COUNT: u8 = 30;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    setup_linker(&out_dir);
    let config = validate_config();
    write_board_config(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse panel.toml and check it fits this board
fn validate_config() -> PanelConfig {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml wiring file.                 ║\n\
            ║  Please create one in the tessera-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Duplicate pins are rejected here by PinMap's deserializer
    let config: PanelConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors: Vec<String> = config
        .pins
        .iter()
        .filter(|&(_, line)| line >= GPIO_COUNT)
        .map(|(signal, line)| format!("{:?} on GPIO{} (0-{} valid)", signal, line, GPIO_COUNT - 1))
        .collect();
    if config.fps > MAX_FPS {
        errors.push(format!("fps = {} (at most {})", config.fps, MAX_FPS));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml has settings this board cannot use            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emit `board_config.rs` for `include!` from the firmware
fn write_board_config(out_dir: &Path, config: &PanelConfig) {
    let pins = config.pins.assignment();
    let code = format!(
        "/// Panel wiring from panel.toml\n\
         pub const BOARD_PINS: PinAssignment = PinAssignment {{\n    \
             data: {:?},\n    \
             dc: {},\n    \
             cs: {},\n    \
             rd: {},\n    \
             wr: {},\n    \
             im0: {},\n    \
             reset: {},\n\
         }};\n\
         \n\
         /// Framebuffer orientation from panel.toml\n\
         pub const ORIENTATION: Orientation = Orientation::{:?};\n\
         \n\
         /// Flush rate from panel.toml\n\
         pub const FPS: u32 = {};\n",
        pins.data,
        pins.dc,
        pins.cs,
        pins.rd,
        pins.wr,
        pins.im0,
        pins.reset,
        config.orientation,
        config.fps(),
    );

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(code.as_bytes()).unwrap();
}
