use std::io;

use dotenv::dotenv;
use trivia_quiz::config::GameConfig;
use trivia_quiz::frontend::audio::LogAudio;
use trivia_quiz::frontend::terminal::TerminalRenderer;
use trivia_quiz::game::{self, Game, GameResult};
use trivia_quiz::quiz::catalog::Catalog;
use trivia_quiz::quiz::session::QuizSession;

#[tokio::main]
async fn main() -> GameResult {
    // A .env file is optional; plain environment variables work too.
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting trivia quiz...");

    let config = GameConfig::from_env()?;
    log::info!("Loading quizzes from {}", config.bank_dir.display());

    let session = QuizSession::new(Catalog::new(&config.bank_dir), config.timing);
    let mut game = Game::new(
        session,
        TerminalRenderer::new(io::stdout()),
        LogAudio::new(),
        game::spawn_stdin_reader(),
        config.tick(),
    );
    game.run().await?;

    log::info!("Thanks for playing!");
    Ok(())
}
