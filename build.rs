//! Build script for twin-servo.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    // Handle memory.x and link arguments for the Pico 1 demos; host builds need nothing.
    let target = env::var("TARGET").expect("TARGET is set by cargo");
    if !target.starts_with("thumbv6m") {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let memory_x = fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory-pico1.x");

    // Only binaries link against the runtime; the library itself stays target-neutral.
    for arg in ["--nmagic", "-Tlink.x", "-Tlink-rp.x", "-Tdefmt.x"] {
        println!("cargo:rustc-link-arg-bins={arg}");
    }
}
