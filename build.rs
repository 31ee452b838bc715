// build.rs

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // The X11 display driver is only compiled on Linux; other targets use the
    // headless driver and need no native libraries at all.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS")
        .expect("CARGO_CFG_TARGET_OS is not set, cannot determine target platform.");
    if target_os != "linux" {
        return;
    }

    // --- Link against libX11 ---
    // We'll try to use pkg-config first, which is the standard way to find
    // library linking information on Unix-like systems.
    // If pkg-config fails (e.g., not installed, or the .pc file is missing/incorrect),
    // we'll fall back to manually specifying common linker flags.
    let result = pkg_config::probe_library("x11");

    if result.is_err() {
        // --- Manual Linking Fallback ---
        // This assumes the library is in a standard path like /usr/lib or
        // /usr/local/lib. If yours is somewhere non-standard, adjust the -L
        // path or rely on environment variables like LIBRARY_PATH.
        eprintln!("pkg-config failed for library 'x11'. Falling back to manual linking.");

        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
        // println!("cargo:rustc-link-search=/usr/lib64");
        // println!("cargo:rustc-link-search=/usr/local/lib");

        eprintln!("Manual linking flags applied. Ensure the libX11 development package is installed.");
    } else {
        // If pkg-config succeeded, it has already printed the necessary flags.
        eprintln!("pkg-config successfully found libX11. Linking configured automatically.");
    }
}
