use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv6m") {
        // Pico 1: copy our custom memory-pico1.x to OUT_DIR as memory.x
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
        let memory_x =
            fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) DST region for `Config::from_build_env`; unknown codes fall back to US at runtime
    let dst_rules = env_or_default("CLOCK_DST_RULES", "US");
    println!("cargo:rustc-env=CLOCK_DST_RULES={dst_rules}");

    println!("cargo:rerun-if-env-changed=CLOCK_DST_RULES");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let _ = dotenvy::from_path(home.join(file));
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
