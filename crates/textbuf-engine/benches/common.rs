// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_lines(lines: usize) -> String {
    (0..lines)
        .map(|n| format!("line {n}: {}", "lorem ipsum ".repeat(n % 9)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[allow(dead_code)]
pub fn generate_large_document() -> String {
    generate_lines(20_000)
}
