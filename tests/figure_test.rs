//! Figure sessions against a fake plotting program that records its input.

use gnupipe::{show_all, Figure, FigureConfig, GnupipeError, PlotCall};
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Configuration whose "gnuplot" copies everything it reads into `path`.
fn recording_config(path: &Path) -> FigureConfig {
    FigureConfig::new()
        .with_program("sh")
        .with_arg("-c")
        .with_arg("cat > \"$0\"")
        .with_arg(path)
        .with_interactive(false)
}

fn recorded_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn commands_are_written_in_issue_order() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    fig.set("grid").unwrap();
    fig.unset("key").unwrap();
    fig.command("set xrange [0:10]").unwrap();
    fig.plot(PlotCall::expression("sin(x)").opt("dashtype", 0)).unwrap();
    fig.show().unwrap();
    fig.close().unwrap();

    assert_eq!(
        recorded_lines(&log),
        vec!["set grid", "unset key", "set xrange [0:10]", "plot sin(x) dashtype 0", "q"]
    );
}

#[test]
fn data_is_inlined_before_the_plot_line() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    fig.plot(PlotCall::xy(vec![0.0, 1.0], vec![0.0, 0.5]).with("lines"))
        .unwrap();
    fig.splot(PlotCall::xyz([1i32, 2], [3i32, 4], [5i32, 6])).unwrap();
    fig.show().unwrap();
    fig.close().unwrap();

    assert_eq!(
        recorded_lines(&log),
        vec![
            "$gnupipe_data_1 << EOD",
            "0.0000000000000000e0 0.0000000000000000e0",
            "1.0000000000000000e0 5.0000000000000000e-1",
            "EOD",
            "plot $gnupipe_data_1 with lines",
            "$gnupipe_data_2 << EOD",
            "1.0000000000000000e0 3.0000000000000000e0 5.0000000000000000e0",
            "2.0000000000000000e0 4.0000000000000000e0 6.0000000000000000e0",
            "EOD",
            "splot $gnupipe_data_2",
            "q",
        ]
    );

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(predicate::str::contains(".tmp").not().eval(text.as_str()));
}

#[test]
fn replot_replays_history_without_duplicates() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log).with_replot(true)).unwrap();
    fig.plot(PlotCall::expression("sin(x)")).unwrap();
    fig.show().unwrap();
    fig.plot(PlotCall::y(vec![2.0])).unwrap();
    fig.show().unwrap();

    assert_eq!(
        fig.history(),
        &["plot sin(x)", "$gnupipe_data_1 << EOD", "2.0000000000000000e0", "EOD", "replot $gnupipe_data_1"]
    );
    fig.close().unwrap();

    assert_eq!(
        recorded_lines(&log),
        vec![
            "plot sin(x)",
            "plot sin(x)",
            "$gnupipe_data_1 << EOD",
            "2.0000000000000000e0",
            "EOD",
            "replot $gnupipe_data_1",
            "q",
        ]
    );
}

#[test]
fn without_replot_only_pending_commands_are_sent() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    fig.plot(PlotCall::expression("x")).unwrap();
    fig.show().unwrap();
    assert!(fig.pending().is_empty());

    fig.plot(PlotCall::expression("x**2")).unwrap();
    assert_eq!(fig.pending(), &["plot x**2"]);
    fig.show().unwrap();
    fig.close().unwrap();

    assert_eq!(recorded_lines(&log), vec!["plot x", "plot x**2", "q"]);
}

#[test]
fn replot_can_be_enabled_mid_session() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    fig.plot(PlotCall::expression("x")).unwrap();
    fig.set_replot(true);
    fig.plot(PlotCall::expression("-x")).unwrap();

    assert_eq!(fig.history(), &["plot x", "replot -x"]);
}

#[test]
fn process_is_terminated_on_scope_exit() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let pid = Figure::scoped(recording_config(&log), |fig| {
        fig.plot(PlotCall::expression("cos(x)"))?;
        fig.show()?;
        Ok::<_, GnupipeError>(fig.pid().unwrap())
    })
    .unwrap();

    assert_eq!(recorded_lines(&log), vec!["plot cos(x)", "q"]);
    if cfg!(target_os = "linux") {
        assert!(!Path::new(&format!("/proc/{}", pid)).exists());
    }
}

#[test]
fn scoped_figure_is_closed_when_the_body_fails() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let result = Figure::scoped(recording_config(&log), |fig| {
        fig.set("grid")?;
        fig.show()?;
        fig.plot(PlotCall::xy(vec![1.0, 2.0], vec![1.0]))
    });

    assert!(matches!(
        result,
        Err(GnupipeError::LengthMismatch {
            expected: 2,
            found: 1,
            column: 1
        })
    ));
    assert_eq!(recorded_lines(&log), vec!["set grid", "q"]);
}

#[test]
fn drop_quits_the_process() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    {
        let mut fig = Figure::with_config(recording_config(&log)).unwrap();
        fig.set("title 'dropped'").unwrap();
        fig.show().unwrap();
    }

    assert_eq!(recorded_lines(&log), vec!["set title 'dropped'", "q"]);
}

#[test]
fn closed_figure_rejects_commands() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    fig.close().unwrap();
    assert!(fig.is_closed());
    assert!(fig.pid().is_none());
    assert!(fig.close().is_ok());

    assert!(matches!(fig.set("grid"), Err(GnupipeError::Closed)));
    assert!(matches!(
        fig.plot(PlotCall::expression("x")),
        Err(GnupipeError::Closed)
    ));
    assert!(matches!(fig.show(), Err(GnupipeError::Closed)));
}

#[test]
fn invalid_data_records_nothing() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("input.gp");

    let mut fig = Figure::with_config(recording_config(&log)).unwrap();
    let err = fig.splot(PlotCall::xy(vec![1.0], vec![2.0])).unwrap_err();
    assert!(matches!(err, GnupipeError::MissingData { kind: "splot", .. }));
    assert!(fig.history().is_empty());

    // The failed call does not consume a block name.
    fig.plot(PlotCall::y(vec![1.0])).unwrap();
    assert_eq!(fig.history()[0], "$gnupipe_data_1 << EOD");
}

#[test]
fn show_all_sends_every_figure() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.gp");
    let second = dir.path().join("second.gp");

    let mut fig1 = Figure::with_config(recording_config(&first)).unwrap();
    let mut fig2 = Figure::with_config(recording_config(&second)).unwrap();
    fig1.plot(PlotCall::expression("x**2")).unwrap();
    fig2.set("hidden3d").unwrap();
    fig2.splot(PlotCall::expression("sin(x)*cos(y)")).unwrap();

    show_all(&mut [&mut fig1, &mut fig2], false).unwrap();
    assert!(fig1.pending().is_empty());
    assert!(fig2.pending().is_empty());
    drop(fig1);
    drop(fig2);

    assert_eq!(recorded_lines(&first), vec!["plot x**2", "q"]);
    assert_eq!(
        recorded_lines(&second),
        vec!["set hidden3d", "splot sin(x)*cos(y)", "q"]
    );
}

#[test]
fn missing_program_is_a_spawn_error() {
    let config = FigureConfig::new().with_program("gnupipe-no-such-plotter");
    let err = Figure::with_config(config).unwrap_err();

    assert!(matches!(err, GnupipeError::Spawn { .. }));
    assert!(predicate::str::contains("gnupipe-no-such-plotter").eval(err.to_string().as_str()));
}

#[test]
fn scope_exit_terminates_a_plotter_that_ignores_input() {
    let config = FigureConfig::new()
        .with_program("sh")
        .with_arg("-c")
        .with_arg("exec sleep 30")
        .with_interactive(false);

    let started = Instant::now();
    let pid = Figure::scoped(config, |fig| {
        fig.set("grid")?;
        fig.show()?;
        Ok::<_, GnupipeError>(fig.pid().unwrap())
    })
    .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    if cfg!(target_os = "linux") {
        assert!(!Path::new(&format!("/proc/{}", pid)).exists());
    }
}

#[test]
fn drop_terminates_a_plotter_that_ignores_input() {
    let config = FigureConfig::new()
        .with_program("sh")
        .with_arg("-c")
        .with_arg("exec sleep 30")
        .with_interactive(false);

    let started = Instant::now();
    {
        let mut fig = Figure::with_config(config).unwrap();
        fig.plot(PlotCall::expression("x")).unwrap();
    }
    assert!(started.elapsed() < Duration::from_secs(5));
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn verbose_figures_log_commands_at_info() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let config = FigureConfig::new()
            .with_program("sh")
            .with_arg("-c")
            .with_arg("cat > /dev/null")
            .with_interactive(false);

        let mut fig = Figure::with_config(config).unwrap();
        fig.set("grid").unwrap();
        fig.set_verbose(true);
        assert!(fig.config().verbose);
        fig.plot(PlotCall::expression("sin(x)")).unwrap();
        fig.set_verbose(false);
        fig.unset("key").unwrap();
        fig.close().unwrap();
    });

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(predicate::str::contains("gnuplot> plot sin(x)").eval(text.as_str()));
    assert!(predicate::str::contains("set grid").not().eval(text.as_str()));
    assert!(predicate::str::contains("unset key").not().eval(text.as_str()));
}
