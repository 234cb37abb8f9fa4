//! Translation of plot calls into gnuplot command lines.

use crate::data::Column;
use crate::error::{GnupipeError, Result};

/// Keyword used when a replot figure already shows a plot.
pub const REPLOT: &str = "replot";

/// Kind of plot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// 2D plot.
    Plot,
    /// 3D plot or surface.
    Splot,
}

impl PlotKind {
    /// The gnuplot keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            PlotKind::Plot => "plot",
            PlotKind::Splot => "splot",
        }
    }

    /// Check the number of data columns given to this kind of plot.
    ///
    /// `plot` takes `y` alone (plotted against its index) or `x, y`;
    /// `splot` takes `x, y, z`.
    pub fn check_columns(self, given: usize) -> Result<()> {
        let (ok, needed) = match self {
            PlotKind::Plot => (given == 1 || given == 2, "1 or 2"),
            PlotKind::Splot => (given == 3, "3"),
        };
        if ok {
            Ok(())
        } else {
            Err(GnupipeError::MissingData {
                kind: self.keyword(),
                needed,
                given,
            })
        }
    }
}

/// What a plot call draws.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotSource {
    /// A gnuplot expression or file reference, sent verbatim (e.g. `sin(x)`).
    Expression(String),
    /// Numeric columns sent inline.
    Data(Vec<Column>),
}

/// A single plot call: source plus style arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCall {
    source: PlotSource,
    args: Vec<String>,
    options: Vec<(String, String)>,
}

impl PlotCall {
    /// Create a call from any source.
    pub fn new(source: PlotSource) -> Self {
        Self {
            source,
            args: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Plot a gnuplot expression.
    pub fn expression(expr: impl Into<String>) -> Self {
        Self::new(PlotSource::Expression(expr.into()))
    }

    /// Plot `y` against `x`.
    pub fn xy(x: impl Into<Column>, y: impl Into<Column>) -> Self {
        Self::new(PlotSource::Data(vec![x.into(), y.into()]))
    }

    /// Plot values against their index.
    pub fn y(values: impl Into<Column>) -> Self {
        Self::new(PlotSource::Data(vec![values.into()]))
    }

    /// Plot points `(x, y, z)`; for use with `splot`.
    pub fn xyz(x: impl Into<Column>, y: impl Into<Column>, z: impl Into<Column>) -> Self {
        Self::new(PlotSource::Data(vec![x.into(), y.into(), z.into()]))
    }

    /// Plot arbitrary columns.
    pub fn columns(columns: Vec<Column>) -> Self {
        Self::new(PlotSource::Data(columns))
    }

    /// Append a positional argument, e.g. `"with lines"`.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a keyword option rendered as `key value`, e.g. `("dashtype", "2")`.
    pub fn opt(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.options.push((key.into(), value.to_string()));
        self
    }

    /// Set the plotting style (`with <style>`).
    pub fn with(self, style: impl ToString) -> Self {
        self.opt("with", style)
    }

    /// Set the legend title.
    pub fn title(self, title: &str) -> Self {
        self.opt("title", quote(title))
    }

    /// Set the line color by name or `#rrggbb`.
    pub fn line_color(self, color: &str) -> Self {
        self.opt("linecolor", format!("rgb {}", quote(color)))
    }

    /// The source of this call.
    pub fn source(&self) -> &PlotSource {
        &self.source
    }

    /// Positional arguments in insertion order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Keyword options in insertion order.
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Render the command line.
    ///
    /// `source` is the text standing for the plotted data: the expression
    /// itself, or the reference of the data block holding the columns.
    pub fn render(&self, keyword: &str, source: &str) -> String {
        let mut parts: Vec<&str> = vec![keyword, source];
        parts.extend(self.args.iter().map(String::as_str));
        for (key, value) in &self.options {
            parts.push(key);
            parts.push(value);
        }
        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `set <setting>`.
pub fn set_command(setting: &str) -> String {
    format!("set {}", setting.trim())
}

/// `unset <setting>`.
pub fn unset_command(setting: &str) -> String {
    format!("unset {}", setting.trim())
}

/// Quote a string for gnuplot, escaping embedded double quotes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
