//! # Binary: TUI Dashboard
//!
//! ## Responsibility
//! Entry point for the devdash terminal dashboard. Starts the fixture API
//! in-process (unless pointed at a running one), wires one fetch controller
//! per view, and runs the draw/input loop.
//!
//! ## Usage
//! ```bash
//! devdash-tui                                   # embedded fixture API
//! devdash-tui --base-url http://127.0.0.1:3000  # use a running `devdash`
//! devdash-tui --config devdash.toml --log-file devdash.log
//! devdash-tui --route /github                  # open a page by path
//! ```
//!
//! ## Guarantees
//! - Terminal state always restored on exit, even on panic
//! - Clean shutdown on q, Esc, or Ctrl+C
//! - The embedded server and the theme context are shut down on exit

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use devdash::config::{loader, DashConfig};
use devdash::source::build_client;
use devdash::tui::app::{App, Command, Route};
use devdash::tui::events::{apply_event, poll_event};
use devdash::tui::ui;
use devdash::{
    web_api, DashError, FetchController, HttpDevelopersSource, HttpWeatherSource,
    MockActivitySource, MockCatalogSource, MockCodeforcesSource, MockGitHubSource, Notice,
    ThemeContext,
};

/// Render refresh rate: 10 frames per second.
const TICK_RATE: Duration = Duration::from_millis(100);

/// CLI arguments for the TUI binary.
struct CliArgs {
    config: Option<PathBuf>,
    base_url: Option<String>,
    log_file: Option<PathBuf>,
    route: Option<String>,
}

fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut cli = CliArgs {
        config: None,
        base_url: None,
        log_file: None,
        route: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "--config" | "-c" => cli.config = Some(PathBuf::from(value()?)),
            "--base-url" => cli.base_url = Some(value()?),
            "--log-file" => cli.log_file = Some(PathBuf::from(value()?)),
            "--route" => cli.route = Some(value()?),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(cli)
}

/// Stdout belongs to the terminal UI, so logs only go to a file when asked.
fn init_file_tracing(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| DashError::Other(format!("tracing init failed: {e}")))?;
    Ok(())
}

/// One controller per view.
struct Controllers {
    weather: Arc<FetchController<HttpWeatherSource>>,
    developers: Arc<FetchController<HttpDevelopersSource>>,
    activity: Arc<FetchController<MockActivitySource>>,
    github: Arc<FetchController<MockGitHubSource>>,
    codeforces: Arc<FetchController<MockCodeforcesSource>>,
    catalog: Arc<FetchController<MockCatalogSource>>,
}

impl Controllers {
    fn new(
        config: &DashConfig,
        base_url: &str,
        notices: &mpsc::UnboundedSender<Notice>,
    ) -> Result<Self, DashError> {
        let client = build_client(&config.client)?;
        let delay = Duration::from_millis(config.mock.delay_ms);
        Ok(Self {
            weather: Arc::new(
                FetchController::new(HttpWeatherSource::new(client.clone(), base_url))
                    .with_notices(notices.clone()),
            ),
            developers: Arc::new(
                FetchController::new(HttpDevelopersSource::new(client, base_url))
                    .with_notices(notices.clone()),
            ),
            activity: Arc::new(
                FetchController::new(MockActivitySource).with_notices(notices.clone()),
            ),
            github: Arc::new(
                FetchController::new(MockGitHubSource::with_delay(delay))
                    .with_notices(notices.clone()),
            ),
            codeforces: Arc::new(
                FetchController::new(MockCodeforcesSource::with_delay(delay))
                    .with_notices(notices.clone()),
            ),
            catalog: Arc::new(
                FetchController::new(MockCatalogSource::with_delay(delay))
                    .with_notices(notices.clone()),
            ),
        })
    }

    /// Kick off the views that load on mount.
    fn load_initial(&self) {
        drop(self.developers.spawn_search(""));
        drop(self.activity.spawn_search(""));
        drop(self.catalog.spawn_search(""));
    }

    fn dispatch(&self, command: Command) {
        let Command::Search { route, query } = command;
        let handle: Option<JoinHandle<_>> = match route {
            Route::Dashboard => Some(self.weather.spawn_search(&query)),
            Route::Codeforces => Some(self.codeforces.spawn_search(&query)),
            Route::GitHub => Some(self.github.spawn_search(&query)),
            Route::MockData | Route::NotFound => None,
        };
        // Completions land in controller state; the handle is not awaited.
        drop(handle);
    }

    /// Copy the latest controller snapshots into the app.
    fn sync(&self, app: &mut App) {
        app.weather = self.weather.state();
        app.developers = self.developers.state();
        app.activity = self.activity.state();
        app.github = self.github.state();
        app.codeforces = self.codeforces.state();
        app.catalog = self.catalog.state();
    }
}

/// Sets up the terminal for TUI rendering.
///
/// # Errors
/// Returns `io::Error` if terminal initialization fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restores the terminal to its original state.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Embedded fixture API bound to an ephemeral port.
struct EmbeddedServer {
    base_url: String,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), DashError>>,
}

fn start_embedded(rt: &Runtime, config: &DashConfig) -> Result<EmbeddedServer, io::Error> {
    let listener = rt.block_on(TcpListener::bind((config.server.host.as_str(), 0)))?;
    let addr = listener.local_addr()?;
    let (shutdown, rx) = oneshot::channel::<()>();
    let server_config = config.server.clone();
    let task = rt.spawn(async move {
        web_api::serve(listener, &server_config, async move {
            let _ = rx.await;
        })
        .await
    });
    Ok(EmbeddedServer {
        base_url: format!("http://{addr}"),
        shutdown,
        task,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(std::env::args())?;
    if let Some(path) = &cli.log_file {
        init_file_tracing(path)?;
    }

    let config = loader::load(cli.config.as_deref())?;
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = rt.enter();

    let embedded = match cli.base_url {
        Some(_) => None,
        None => Some(start_embedded(&rt, &config)?),
    };
    let base_url = match (&cli.base_url, &embedded) {
        (Some(url), _) => url.clone(),
        (None, Some(server)) => server.base_url.clone(),
        (None, None) => config.client.base_url.clone(),
    };
    info!(%base_url, "dashboard starting");

    let theme = ThemeContext::create(config.theme.default, config.theme.enable_system);
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel();
    let controllers = Controllers::new(&config, &base_url, &notice_tx)?;
    controllers.load_initial();

    // Install panic hook that restores terminal before printing panic message
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(theme.handle());
    if let Some(path) = &cli.route {
        let route = app.open_path(path);
        info!(requested = %path, route = route.path(), "initial page");
    }

    let result = run(&mut terminal, &mut app, &controllers, &mut notice_rx);

    restore_terminal(&mut terminal)?;
    theme.teardown();

    if let Some(server) = embedded {
        let _ = server.shutdown.send(());
        match rt.block_on(server.task) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "embedded server failed"),
            Err(e) => warn!(error = %e, "embedded server task aborted"),
        }
    }

    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Runs the draw/input loop until the user quits.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controllers: &Controllers,
    notices: &mut mpsc::UnboundedReceiver<Notice>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        controllers.sync(app);
        while let Ok(notice) = notices.try_recv() {
            app.push_notice(notice);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        let event = poll_event(TICK_RATE, app.editing);
        if let Some(command) = apply_event(app, event) {
            controllers.dispatch(command);
        }

        if app.should_quit {
            break;
        }

        app.on_tick();
    }

    Ok(())
}
