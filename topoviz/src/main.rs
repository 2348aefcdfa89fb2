use topoviz::commands::command_argument_builder;
use topoviz::handlers::{
    VisualizeOptions, finish, handle_visualize, init_tracing, log_level, print_error,
};
use topoviz_render::show_image;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let options = match VisualizeOptions::from_matches(&matches) {
        Ok(options) => options,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    init_tracing(log_level(options.quiet, options.verbosity));

    match handle_visualize(&options).await {
        Ok(summary) => {
            finish(&summary, options.quiet, options.show, show_image);
        }
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}
