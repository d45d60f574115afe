#[cfg(not(feature = "c-reference"))]
fn main() {
    // Native kernel only: nothing to generate or link
    println!("cargo:rerun-if-changed=build.rs");
}

#[cfg(feature = "c-reference")]
fn main() {
    use std::path::PathBuf;
    use std::process::Command;

    use bindgen::Builder;

    println!("cargo:rerun-if-changed=csrc/sos_fixed.h");
    println!("cargo:rerun-if-changed=src/c_wrapper/wrapper.h");

    let wrapper_path = PathBuf::from("src/c_wrapper/wrapper.h")
        .canonicalize()
        .expect("Cannot canonicalize wrapper path")
        .to_str()
        .expect("The wrapper path is not a valid string.")
        .to_owned();
    let output_path = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is not set"));

    // Path for the static and inline function
    let static_filename = "sos_fixed_static_wrapper";
    let static_fns_path = output_path
        .join(static_filename.to_owned() + ".c")
        .to_str()
        .expect("Error joining $OUT_DIR with static fns.")
        .to_owned();

    // This is the path to the object file
    let obj_path = output_path.join(static_filename.to_owned() + ".o");
    // This is the path to the static library file.
    let lib_path = output_path.join("lib".to_owned() + static_filename + ".a");

    // Build the bindings, only the sos_fixed_* API is of interest
    let bindings = Builder::default()
        .header(&wrapper_path)
        .generate_comments(false)
        .allowlist_function("sos_fixed_.*")
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .wrap_static_fns(true)
        .wrap_static_fns_path(&static_fns_path)
        .generate()
        .expect("Unable to generate bindings");

    // Compile the generated wrappers into an object file
    let clang_output = Command::new("clang")
        .arg("-O")
        .arg("-c")
        .arg("-o")
        .arg(&obj_path)
        .arg(&static_fns_path)
        .arg("-include")
        .arg(&wrapper_path)
        .output()
        .expect("Could not run clang");

    if !clang_output.status.success() {
        panic!(
            "Could not compile object file:\n{}",
            String::from_utf8_lossy(&clang_output.stderr)
        );
    }

    // Turn the object file into a static library
    #[cfg(not(target_os = "windows"))]
    let lib_output = Command::new("ar")
        .arg("rcs")
        .arg(&lib_path)
        .arg(&obj_path)
        .output()
        .expect("Could not run ar");
    #[cfg(target_os = "windows")]
    let lib_output = Command::new("LIB")
        .arg(&obj_path)
        .arg(format!(
            "/OUT:{}",
            output_path
                .join(static_filename.to_owned() + ".lib")
                .display()
        ))
        .output()
        .expect("Could not run LIB");
    if !lib_output.status.success() {
        panic!(
            "Could not emit library file {}:\n{}",
            lib_path.display(),
            String::from_utf8_lossy(&lib_output.stderr)
        );
    }
    // So that cargo can find the wrapped library for inline static
    println!("cargo:rustc-link-search=native={}", output_path.display());
    // Tell cargo to statically link against the static wrapper
    println!("cargo:rustc-link-lib=static={}", static_filename);

    // Write the rust bindings
    bindings
        .write_to_file(output_path.join("bindings.rs"))
        .expect("Cound not write bindings to the Rust file");
}
