use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Sources under `src/async/` that get a blocking twin
const SOURCES: [&str; 3] = ["driver", "discovery", "ups"];

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));

    for name in SOURCES {
        let source = format!("src/async/{name}.rs");
        println!("cargo:rerun-if-changed={source}");

        // Produce a sync version from the async one
        let asynced = std::fs::read_to_string(&source)?;
        let asynced = asynced.replace("embedded_hal_async", "embedded_hal");
        let asynced = asynced.replace("async", "");
        let asynced = asynced.replace(".await", "");

        let mut out_path = out_dir.clone();
        out_path.push(format!("blocking_{name}.rs"));
        File::create(out_path)?.write_all(asynced.as_bytes())?;
    }

    Ok(())
}
