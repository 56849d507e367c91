fn main() -> std::io::Result<()> {
    // Set up logging for development
    env_logger::init();

    // Run the interactive tracer shell
    area_tracer::run_app()
}
