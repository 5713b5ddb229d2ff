fn main() -> std::io::Result<()> {
    healthmate_lib::run()
}
