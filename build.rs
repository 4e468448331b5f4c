use std::path::Path;
use std::process::Command;

const CSS_INPUT: &str = "static/css/input.css";
const CSS_OUTPUT: &str = "static/css/dist/output.css";

fn main() {
    println!("cargo:rerun-if-changed={CSS_INPUT}");
    println!("cargo:rerun-if-changed=templates/");
    println!("cargo:rerun-if-env-changed=KAFKA_CONSOLE_SKIP_CSS");

    // Packaging environments without node set this and ship static/css/console.css only.
    if std::env::var_os("KAFKA_CONSOLE_SKIP_CSS").is_some() || !Path::new(CSS_INPUT).exists() {
        return;
    }

    match Command::new("npx")
        .args(["@tailwindcss/cli", "-i", CSS_INPUT, "-o", CSS_OUTPUT, "--minify"])
        .status()
    {
        Ok(s) if s.success() => {}
        Ok(s) => println!("cargo:warning=tailwind build exited with {s}, using console.css only"),
        Err(e) => println!("cargo:warning=tailwind unavailable ({e}), using console.css only"),
    }
}
