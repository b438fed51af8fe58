// Console front end - line commands driving the screens
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::telemetry::Parameter;
use crate::domain::time_window::{TimeWindow, format_wire_time};
use crate::presentation::app_state::AppState;
use crate::presentation::chart::{ChartFrame, Point};
use crate::presentation::chart::svg::to_svg;
use crate::presentation::navigation::{Navigator, ScreenId};
use crate::presentation::screens::history::{HistoryScreen, WellSelector};
use crate::presentation::screens::login::LoginScreen;
use crate::presentation::screens::main_menu::{MainScreen, WELCOME};
use crate::presentation::screens::register::RegisterScreen;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login(String),
    Register,
    Name(String),
    Phone(String),
    Company(String),
    Submit,
    Back,
    History,
    Logout,
    Wells,
    Well(String),
    Window(TimeWindow),
    Query,
    Param(Parameter),
    Table,
    Chart {
        path: PathBuf,
        size: Option<(f64, f64)>,
    },
    TimeLabels(bool),
}

/// Parse one input line for the given screen.
pub fn parse_command(screen: ScreenId, line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    match word.as_str() {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    match (screen, word.as_str()) {
        (ScreenId::Login, "login") => Ok(Command::Login(rest.to_string())),
        (ScreenId::Login, "register") => Ok(Command::Register),

        (ScreenId::Register, "name") => Ok(Command::Name(rest.to_string())),
        (ScreenId::Register, "phone") => Ok(Command::Phone(rest.to_string())),
        (ScreenId::Register, "company") => Ok(Command::Company(rest.to_string())),
        (ScreenId::Register, "submit") => Ok(Command::Submit),

        (ScreenId::Main, "history") => Ok(Command::History),
        (ScreenId::Main, "logout") => Ok(Command::Logout),

        (ScreenId::History, "wells") => Ok(Command::Wells),
        (ScreenId::History, "well") if !rest.is_empty() => Ok(Command::Well(rest.to_string())),
        (ScreenId::History, "last") => parse_last(rest).map(Command::Window),
        (ScreenId::History, "range") => parse_range(rest).map(Command::Window),
        (ScreenId::History, "query") => Ok(Command::Query),
        (ScreenId::History, "param") => Parameter::from_code(rest)
            .map(Command::Param)
            .ok_or_else(|| format!("Unknown parameter '{rest}', expected A01..A05")),
        (ScreenId::History, "table") => Ok(Command::Table),
        (ScreenId::History, "chart") if !rest.is_empty() => Ok(parse_chart(rest)),
        (ScreenId::History, "xlabels") => match rest {
            "percent" => Ok(Command::TimeLabels(false)),
            "time" => Ok(Command::TimeLabels(true)),
            _ => Err("Usage: xlabels percent|time".to_string()),
        },

        (ScreenId::Register | ScreenId::History, "back") => Ok(Command::Back),

        _ => Err(format!(
            "Unknown command '{}' on the {} screen, type 'help'",
            line,
            screen.name()
        )),
    }
}

fn parse_last(rest: &str) -> Result<TimeWindow, String> {
    let mut parts = rest.split_whitespace();
    let number = |part: Option<&str>| -> Result<u32, String> {
        match part {
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| format!("'{text}' is not a number")),
            None => Ok(0),
        }
    };
    let hours = number(parts.next())?;
    let minutes = number(parts.next())?;
    TimeWindow::relative(hours, minutes).map_err(|e| e.to_string())
}

fn parse_range(rest: &str) -> Result<TimeWindow, String> {
    let (start, end) = rest
        .split_once(" to ")
        .ok_or_else(|| "Usage: range YYYY-MM-DD HH:MM:SS to YYYY-MM-DD HH:MM:SS".to_string())?;
    TimeWindow::parse_absolute(start, end).map_err(|e| e.to_string())
}

/// `<file> [WIDTHxHEIGHT]`; a trailing token that is not a size belongs to the path.
fn parse_chart(rest: &str) -> Command {
    let size = |token: &str| {
        let (w, h) = token.split_once('x')?;
        Some((w.parse::<f64>().ok()?, h.parse::<f64>().ok()?))
    };
    match rest.rsplit_once(char::is_whitespace) {
        Some((path, token)) if size(token).is_some() => Command::Chart {
            path: PathBuf::from(path.trim()),
            size: size(token),
        },
        _ => Command::Chart {
            path: PathBuf::from(rest),
            size: None,
        },
    }
}

fn help(screen: ScreenId) -> &'static str {
    match screen {
        ScreenId::Login => "login <phone>, register, quit",
        ScreenId::Register => "name <text>, phone <digits>, company <text>, submit, back, quit",
        ScreenId::Main => "history, logout, quit",
        ScreenId::History => {
            "wells, well <n|id-name>, last <hours> [minutes], range <start> to <end>, query, \
             param <A01..A05>, table, chart <file.svg> [WxH], xlabels percent|time, back, quit"
        }
    }
}

pub struct Console {
    state: AppState,
    navigator: Navigator,
    login: LoginScreen,
    register: RegisterScreen,
    main: MainScreen,
    history: HistoryScreen,
    frame: ChartFrame,
    clock: fn() -> NaiveDateTime,
}

impl Console {
    pub fn new(state: AppState, frame: ChartFrame) -> Self {
        Self {
            state,
            navigator: Navigator::new(),
            login: LoginScreen::default(),
            register: RegisterScreen::default(),
            main: MainScreen::default(),
            history: HistoryScreen::new(frame),
            frame,
            clock: || chrono::Local::now().naive_local(),
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(self.view().as_bytes()).await?;

        loop {
            let prompt = format!("{}> ", self.navigator.current().name());
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let reply = match parse_command(self.navigator.current(), &line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(message) => format!("{message}\n"),
            };
            output.write_all(reply.as_bytes()).await?;
        }

        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> String {
        let now = (self.clock)();
        match command {
            Command::Help => format!("{}\n", help(self.navigator.current())),
            Command::Quit => String::new(),

            Command::Login(phone) => {
                self.login.phone_input = phone;
                match self.login.submit(&self.state.auth_service, now).await {
                    Some(session) => {
                        self.main.on_enter(&session, now);
                        self.navigator.sign_in(session);
                        self.view()
                    }
                    None => self.message_line(self.login.message()),
                }
            }
            Command::Register => {
                self.navigator.go(ScreenId::Register);
                self.view()
            }

            Command::Name(name) => {
                self.register.name_input = name;
                String::new()
            }
            Command::Phone(phone) => {
                self.register.phone_input = phone;
                String::new()
            }
            Command::Company(company) => {
                self.register.company_input = company;
                String::new()
            }
            Command::Submit => {
                if self.register.submit(&self.state.auth_service).await {
                    let mut out = self.message_line(self.register.message());
                    self.navigator.go(ScreenId::Login);
                    out.push_str(&self.view());
                    out
                } else {
                    self.message_line(self.register.message())
                }
            }

            Command::Back => {
                let target = match self.navigator.current() {
                    ScreenId::History => ScreenId::Main,
                    _ => ScreenId::Login,
                };
                self.navigator.go(target);
                if let (ScreenId::Main, Some(session)) =
                    (self.navigator.current(), self.navigator.session())
                {
                    self.main.on_enter(session, now);
                }
                self.view()
            }

            Command::History => {
                if self.navigator.go(ScreenId::History) == ScreenId::History {
                    self.history.load_wells(&self.state.history_service).await;
                }
                self.view()
            }
            Command::Logout => {
                if let Some(session) = self.navigator.sign_out() {
                    tracing::info!(
                        "{} ({}) logged out, signed in at {}",
                        session.user.name,
                        session.phone,
                        format_wire_time(&session.started_at)
                    );
                }
                self.history = HistoryScreen::new(self.frame);
                self.main = MainScreen::default();
                self.view()
            }

            Command::Wells => {
                self.history.load_wells(&self.state.history_service).await;
                self.well_list()
            }
            Command::Well(choice) => {
                let selected = match choice.parse::<usize>() {
                    Ok(n) if n >= 1 => self.history.select_well(n - 1),
                    Ok(_) => false,
                    Err(_) => self.history.select_well_label(&choice),
                };
                if selected {
                    self.well_list()
                } else {
                    format!("No well '{choice}', type 'wells' to list them\n")
                }
            }
            Command::Window(window) => {
                self.history.set_window(window);
                format!("{}\n", describe_window(&window, now))
            }
            Command::Query => {
                if self.history.query(&self.state.history_service, now).await {
                    match self.history.series() {
                        Some(series) if !series.is_empty() => format!(
                            "{}, {} readings\n",
                            self.history.well_label,
                            series.readings.len()
                        ),
                        _ => format!("{}, no readings in this window\n", self.history.well_label),
                    }
                } else {
                    self.message_line(self.history.message())
                }
            }
            Command::Param(parameter) => {
                self.history.select_parameter(parameter);
                let chart = self.history.chart();
                if chart.points().is_empty() {
                    format!("Charting {parameter}\n")
                } else {
                    format!(
                        "Charting {parameter}, axis {:.1} to {:.1}\n",
                        chart.range().min_value(),
                        chart.range().max_value()
                    )
                }
            }
            Command::Table => self.table(),
            Command::Chart { path, size } => {
                if let Some((width, height)) = size {
                    match ChartFrame::new(Point::new(0.0, 0.0), width, height) {
                        Some(frame) => self.history.resize_chart(frame),
                        None => return format!("Invalid chart size {width}x{height}\n"),
                    }
                }
                match self.write_chart(&path).await {
                    Ok(()) => format!("Chart written to {}\n", path.display()),
                    Err(e) => {
                        tracing::warn!("Failed to write chart to {}: {}", path.display(), e);
                        format!("Could not write {}: {}\n", path.display(), e)
                    }
                }
            }
            Command::TimeLabels(enabled) => {
                self.history.set_time_labels(enabled);
                if enabled {
                    "X axis shows the time range\n".to_string()
                } else {
                    "X axis shows 0 to 100%\n".to_string()
                }
            }
        }
    }

    async fn write_chart(&mut self, path: &Path) -> anyhow::Result<()> {
        let frame = *self.history.chart().frame();
        let svg = to_svg(&self.history.draw(), frame.width, frame.height)?;
        tokio::fs::write(path, svg).await?;
        Ok(())
    }

    fn message_line(&self, message: Option<&str>) -> String {
        message.map(|m| format!("{m}\n")).unwrap_or_default()
    }

    /// Header for the current screen.
    fn view(&self) -> String {
        let screen = self.navigator.current();
        let mut out = format!("== {} ==\n", screen.name());
        match screen {
            ScreenId::Login => {}
            ScreenId::Register => {}
            ScreenId::Main => {
                let _ = writeln!(out, "{WELCOME}");
                let _ = writeln!(out, "{}", self.main.user_line);
                let _ = writeln!(out, "{}", self.main.last_update);
            }
            ScreenId::History => {
                out.push_str(&self.well_list());
                let _ = writeln!(out, "{}", self.history.well_label);
                let _ = writeln!(
                    out,
                    "{} | {}",
                    describe_window(&self.history.window, (self.clock)()),
                    self.history.parameter()
                );
            }
        }
        let _ = writeln!(out, "Commands: {}", help(screen));
        out
    }

    fn well_list(&self) -> String {
        match &self.history.wells {
            WellSelector::Loading => "Loading wells...\n".to_string(),
            WellSelector::Failed(message) => format!("Wells unavailable: {message}\n"),
            WellSelector::Loaded { wells, .. } if wells.is_empty() => "No wells\n".to_string(),
            WellSelector::Loaded { wells, selected } => {
                let mut out = String::new();
                for (i, well) in wells.iter().enumerate() {
                    let marker = if *selected == Some(i) { '*' } else { ' ' };
                    let _ = writeln!(out, "{marker} {}. {}", i + 1, well.label());
                }
                out
            }
        }
    }

    fn table(&self) -> String {
        let Some(table) = self.history.table() else {
            return "No data, run 'query' first\n".to_string();
        };
        let widths: Vec<usize> = table
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(String::len)
                    .fold(header.len(), usize::max)
            })
            .collect();

        let mut out = String::new();
        for row in std::iter::once(&table.headers).chain(&table.rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            let _ = writeln!(out, "{}", cells.join("  ").trim_end());
        }
        out
    }
}

fn describe_window(window: &TimeWindow, now: NaiveDateTime) -> String {
    let (start, end) = window.resolve(now);
    match window {
        TimeWindow::Relative { hours, minutes } => format!(
            "Last {hours}h {minutes}m ({} to {})",
            format_wire_time(&start),
            format_wire_time(&end)
        ),
        TimeWindow::Absolute { .. } => format!(
            "{} to {}",
            format_wire_time(&start),
            format_wire_time(&end)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::auth_service::AuthService;
    use crate::application::history_service::HistoryService;
    use crate::application::testing::{FakeRepository, now};
    use crate::presentation::chart::Point;
    use std::sync::Arc;

    fn console(repo: Arc<FakeRepository>) -> Console {
        let state = AppState {
            auth_service: AuthService::new(repo.clone()),
            history_service: HistoryService::new(repo),
        };
        let frame = ChartFrame::new(Point::new(0.0, 0.0), 800.0, 400.0).unwrap();
        Console::new(state, frame).with_clock(now)
    }

    async fn run_script(console: &mut Console, script: &str) -> String {
        let mut output = Vec::new();
        console.run(script.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands_per_screen() {
        assert_eq!(
            parse_command(ScreenId::Login, "login 13800138000"),
            Ok(Command::Login("13800138000".to_string()))
        );
        assert_eq!(parse_command(ScreenId::Main, "HISTORY"), Ok(Command::History));
        assert_eq!(parse_command(ScreenId::History, "help"), Ok(Command::Help));
        assert_eq!(
            parse_command(ScreenId::Register, "name Li Wei"),
            Ok(Command::Name("Li Wei".to_string()))
        );
        assert!(parse_command(ScreenId::Login, "history").is_err());
        assert!(parse_command(ScreenId::Main, "back").is_err());
        assert!(parse_command(ScreenId::History, "well").is_err());
    }

    #[test]
    fn test_parse_history_arguments() {
        assert_eq!(
            parse_command(ScreenId::History, "last 2 30"),
            Ok(Command::Window(TimeWindow::Relative {
                hours: 2,
                minutes: 30
            }))
        );
        assert_eq!(
            parse_command(ScreenId::History, "last 3"),
            Ok(Command::Window(TimeWindow::Relative {
                hours: 3,
                minutes: 0
            }))
        );
        assert!(parse_command(ScreenId::History, "last 0 0").is_err());
        assert!(parse_command(ScreenId::History, "last 25").is_err());
        assert!(parse_command(ScreenId::History, "last x").is_err());

        let range = parse_command(
            ScreenId::History,
            "range 2024-03-15 08:00:00 to 2024-03-15 09:00:00",
        );
        assert!(matches!(range, Ok(Command::Window(TimeWindow::Absolute { .. }))));
        assert!(parse_command(ScreenId::History, "range 2024-03-15 08:00:00").is_err());

        assert_eq!(
            parse_command(ScreenId::History, "param a03"),
            Ok(Command::Param(Parameter::Torque))
        );
        assert!(parse_command(ScreenId::History, "param A09").is_err());
        assert_eq!(
            parse_command(ScreenId::History, "xlabels time"),
            Ok(Command::TimeLabels(true))
        );
        assert_eq!(
            parse_command(ScreenId::History, "chart out.svg 1024x512"),
            Ok(Command::Chart {
                path: PathBuf::from("out.svg"),
                size: Some((1024.0, 512.0)),
            })
        );
        assert_eq!(
            parse_command(ScreenId::History, "chart my chart.svg"),
            Ok(Command::Chart {
                path: PathBuf::from("my chart.svg"),
                size: None,
            })
        );
    }

    #[tokio::test]
    async fn test_login_rejects_short_phone() {
        let repo = Arc::new(FakeRepository::default());
        let mut console = console(repo.clone());

        let out = run_script(&mut console, "login 12345\n").await;
        assert!(out.contains("Please enter an 11-digit phone number"));
        assert_eq!(console.navigator().current(), ScreenId::Login);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_back_to_login() {
        let repo = Arc::new(FakeRepository::default());
        let mut console = console(repo.clone());

        let out = run_script(
            &mut console,
            "register\nname Li Wei\nphone 13800138000\ncompany CNPC\nsubmit\n",
        )
        .await;
        assert!(out.contains("Registration successful"));
        assert_eq!(console.navigator().current(), ScreenId::Login);
        assert_eq!(repo.calls(), vec!["register Li Wei".to_string()]);
    }

    #[tokio::test]
    async fn test_history_session_flow() {
        let repo = Arc::new(FakeRepository::default());
        let mut console = console(repo.clone());

        let out = run_script(
            &mut console,
            "login 13800138000\nhistory\nwell 2\nlast 2 30\nquery\nparam A02\ntable\nback\n",
        )
        .await;

        assert!(out.contains("Li Wei | Sinopec"));
        assert!(out.contains("Last updated: 2024-03-15 12:30:00"));
        assert!(out.contains("* 2. 9-Shengli 3"));
        assert!(out.contains("Well: Tarim 101, 3 readings"));
        assert!(out.contains("Charting Pump pressure (A02)"));
        assert!(out.contains("Index  Hook load"));
        assert!(out.contains("12:30:00"));
        assert_eq!(console.navigator().current(), ScreenId::Main);
        assert_eq!(
            repo.calls(),
            vec![
                "login 13800138000".to_string(),
                "wells".to_string(),
                "query 9 2024-03-15 10:00:00 2024-03-15 12:30:00".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let repo = Arc::new(FakeRepository::default());
        let mut console = console(repo);

        run_script(&mut console, "login 13800138000\nlogout\n").await;
        assert_eq!(console.navigator().current(), ScreenId::Login);
        assert!(console.navigator().session().is_none());

        let out = run_script(&mut console, "history\n").await;
        assert!(out.contains("Unknown command 'history' on the login screen"));
    }

    #[tokio::test]
    async fn test_chart_writes_svg() {
        let repo = Arc::new(FakeRepository::default());
        let mut console = console(repo);
        let path = std::env::temp_dir().join(format!("drilling-chart-{}.svg", std::process::id()));

        let script = format!(
            "login 13800138000\nhistory\nquery\nchart {}\nquit\n",
            path.display()
        );
        let out = run_script(&mut console, &script).await;
        assert!(out.contains("Chart written to"));

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("100%"));
    }
}
