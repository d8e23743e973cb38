// =============================================================================
// Drive a board session from the terminal with a list of tokens:
//
//   playthrough --first-turn white e2 e4 e7 e5 g1 f3
//
// Square names are clicks, `=q` / `=knight` answer a promotion prompt and
// `reset` starts over. Moves settle immediately.
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use std::path::PathBuf;

    use anyhow::{bail, Context};
    use clap::{Parser, ValueEnum};
    use tracing::warn;
    use tracing_subscriber::EnvFilter;

    use chessboard::config::{FirstTurn, SessionConfig};
    use chessboard::piece::PromotionChoice;
    use chessboard::render::MirrorView;
    use chessboard::session::{ClickOutcome, PromotionOutcome, Session, SettleOutcome};
    use chessboard::snapshot::Snapshot;
    use chessboard::square::Square;

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Side {
        White,
        Black,
        Random,
    }

    #[derive(Parser, Debug)]
    #[command(about = "Play clicks against a chessboard session and print the board")]
    struct Args {
        /// JSON session configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides `first_turn` from the configuration
        #[arg(long, value_enum)]
        first_turn: Option<Side>,

        /// Print a JSON snapshot after each token instead of the text board
        #[arg(long)]
        json: bool,

        /// Squares to click (e2), promotion choices (=q) or `reset`
        tokens: Vec<String>,
    }

    enum Token {
        Click(Square),
        Promote(PromotionChoice),
        Reset,
    }

    fn parse_token(raw: &str) -> anyhow::Result<Token> {
        if raw.eq_ignore_ascii_case("reset") {
            return Ok(Token::Reset);
        }
        if let Some(kind) = raw.strip_prefix('=') {
            return Ok(Token::Promote(kind.parse()?));
        }
        Ok(Token::Click(raw.parse()?))
    }

    fn load_config(args: &Args) -> anyhow::Result<SessionConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                SessionConfig::from_json(&text)?
            }
            None => SessionConfig::new(),
        };
        if let Some(side) = args.first_turn {
            config.first_turn = match side {
                Side::White => FirstTurn::White,
                Side::Black => FirstTurn::Black,
                Side::Random => FirstTurn::Random,
            };
        }
        Ok(config)
    }

    fn show(session: &Session, view: &MirrorView, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", serde_json::to_string(&Snapshot::of(session))?);
        } else {
            print!("{}", view.to_text());
            println!("{} to move ({})\n", session.turn(), session.phase().name());
        }
        Ok(())
    }

    pub fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let args = Args::parse();
        let tokens = args
            .tokens
            .iter()
            .map(|raw| parse_token(raw).with_context(|| format!("bad token {raw:?}")))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let config = load_config(&args)?;
        let mut view = MirrorView::new(config.square_px);
        let mut session = Session::new(config);
        session.draw(&mut view);
        show(&session, &view, args.json)?;

        for token in tokens {
            match token {
                Token::Click(sq) => {
                    if let ClickOutcome::MoveStarted { ticket, .. } = session.click(sq, &mut view) {
                        if session.settle(ticket, &mut view) == SettleOutcome::Stale {
                            bail!("move to {sq} was lost before it settled");
                        }
                    }
                }
                Token::Promote(choice) => {
                    if session.choose_promotion(choice, &mut view) == PromotionOutcome::Ignored {
                        warn!("no promotion pending, {choice:?} ignored");
                    }
                }
                Token::Reset => session.reset(&mut view),
            }
            show(&session, &view, args.json)?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    driver::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
