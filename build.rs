fn main() {
    // Embedded migrations (`sqlx::migrate!`) are read at compile time
    println!("cargo:rerun-if-changed=migrations");
}
