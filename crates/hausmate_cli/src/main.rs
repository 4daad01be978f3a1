//! Smoke binary: proves `hausmate_core` links and answers.
//!
//! Handy when the Flutter toolchain is not around; prints one stable
//! line and exits.

fn main() {
    println!(
        "hausmate_core v{} ping={}",
        hausmate_core::core_version(),
        hausmate_core::ping()
    );
}
