//! Build script for the PCA9685 driver
//!
//! Handles:
//! - Linker scripts for the demo firmware on bare-metal targets only,
//!   so host test builds are unaffected

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, docs) need nothing from here
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    if env::var_os("CARGO_FEATURE_DEMO").is_some() {
        // memory.x comes from embassy-stm32's `memory-x` feature
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
