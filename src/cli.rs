use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use console::{pad_str, style, Alignment, StyledObject};
use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::args::{Args, Command, ExportArgs, SessionArgs, ViewArgs};
use crate::config::Config;
use crate::error::LedgerError;
use crate::export::PngRankingRenderer;
use crate::import::parse_date;
use crate::ledger::{
    parse_client_selector, parse_product_type_selector, Filter, Period, ProductType, Record,
    Status, MAX_QUANTITY, MAX_YEAR, MIN_YEAR,
};
use crate::operations::{AccumulatedPoint, ClientTotal};
use crate::session::{DashboardView, Session};
use crate::terminal::{self, BulletPointPrinter, LineWriter};

const BAR_WIDTH: usize = 40;
const WILDCARD_LABEL: &str = "Todos";
const NO_RECORDS: &str = "Nenhum registro encontrado com os filtros selecionados.";

pub fn main(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    match args.command {
        None => Cli::new(open_session(config, &SessionArgs::default())?).main_dashboard(),
        Some(Command::Dashboard(session_args)) => {
            Cli::new(open_session(config, &session_args)?).main_dashboard()
        }
        Some(Command::Report(view_args)) => {
            Cli::new(open_view(config, &view_args)?).main_report()
        }
        Some(Command::ExportCsv(export_args)) => {
            let out_dir = out_dir(&config, &export_args);
            Cli::new(open_view(config, &export_args.view)?).main_export_csv(&out_dir)
        }
        Some(Command::ExportRanking(export_args)) => {
            let out_dir = out_dir(&config, &export_args);
            Cli::new(open_view(config, &export_args.view)?).main_export_ranking(&out_dir)
        }
    }
}

fn out_dir(config: &Config, export_args: &ExportArgs) -> PathBuf {
    export_args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.export_dir.clone())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn open_session(mut config: Config, session_args: &SessionArgs) -> Result<Session> {
    if session_args.no_seed {
        config.seed = false;
    }
    let mut session = Session::new(config)?;
    for path in &session_args.imports {
        import_file(&mut session, path)?;
    }
    Ok(session)
}

fn open_view(config: Config, view_args: &ViewArgs) -> Result<Session> {
    let mut session = open_session(config, &view_args.session)?;
    let default_period = session.filter().period;
    let period = Period::new(
        view_args.year.unwrap_or(default_period.year()),
        view_args.month.unwrap_or(default_period.month()),
    )?;
    let product_type = match &view_args.product_type {
        Some(value) => parse_product_type_selector(value)?,
        None => None,
    };
    let client = view_args
        .client
        .as_deref()
        .and_then(parse_client_selector);
    session.set_filter(
        Filter::new(period)
            .with_product_type(product_type)
            .with_client(client),
    );
    Ok(session)
}

fn import_file(session: &mut Session, path: &Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let count = session
        .import_csv(BufReader::new(file), today())
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ShowCharts,
    ChangeFilter,
    EditRecords,
    AddRecord,
    ImportCsv,
    ExportCsv,
    ExportRanking,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::ShowCharts,
        MenuAction::ChangeFilter,
        MenuAction::EditRecords,
        MenuAction::AddRecord,
        MenuAction::ImportCsv,
        MenuAction::ExportCsv,
        MenuAction::ExportRanking,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::ShowCharts => "Show records and charts",
            MenuAction::ChangeFilter => "Change filter",
            MenuAction::EditRecords => "Edit filtered records",
            MenuAction::AddRecord => "Add record",
            MenuAction::ImportCsv => "Import CSV",
            MenuAction::ExportCsv => "Export CSV (filtered)",
            MenuAction::ExportRanking => "Export ranking image",
            MenuAction::Quit => "Quit",
        }
    }
}

pub struct Cli {
    session: Session,
    renderer: PngRankingRenderer,
}

impl Cli {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            renderer: PngRankingRenderer::new(),
        }
    }

    pub fn main_dashboard(&mut self) -> Result<()> {
        println!(
            "{}",
            style_header(&format!(
                "{} volumes: Toras, Cavaco & Lenha",
                self.session.config().brand
            ))
        );
        println!("Changes are kept for this session only.");
        if let Err(err) = self.main_report() {
            println!("{}", style_error(&format!("{err:#}")));
        }
        loop {
            println!();
            println!("{} {}", style("Filter:").bold(), self.session.filter());
            let labels: Vec<_> = MenuAction::ALL.iter().map(MenuAction::label).collect();
            let action = MenuAction::ALL[terminal::select("Action", &labels, 0)?];
            let result = match action {
                MenuAction::ShowCharts => self.main_report(),
                MenuAction::ChangeFilter => self.main_change_filter(),
                MenuAction::EditRecords => self.main_edit_records(),
                MenuAction::AddRecord => self.main_add_record(),
                MenuAction::ImportCsv => self.main_import_csv(),
                MenuAction::ExportCsv => {
                    let out_dir = self.session.config().export_dir.clone();
                    self.main_export_csv(&out_dir)
                }
                MenuAction::ExportRanking => {
                    let out_dir = self.session.config().export_dir.clone();
                    self.main_export_ranking(&out_dir)
                }
                MenuAction::Quit => break,
            };
            // Failed actions never end the session
            if let Err(err) = result {
                println!("{}", style_error(&format!("{err:#}")));
            }
        }
        log::info!("Session ended");
        Ok(())
    }

    pub fn main_report(&self) -> Result<()> {
        print_view(&BulletPointPrinter::new_stdout(), &self.session.view()?);
        Ok(())
    }

    fn main_change_filter(&mut self) -> Result<()> {
        let current = self.session.filter().clone();

        let mut type_labels = vec![WILDCARD_LABEL];
        type_labels.extend(ProductType::ALL.iter().map(ProductType::label));
        let type_default = current
            .product_type
            .and_then(|current| ProductType::ALL.iter().position(|t| *t == current))
            .map(|index| index + 1)
            .unwrap_or(0);
        let type_index = terminal::select("Tipo", &type_labels, type_default)?;
        let product_type = type_index.checked_sub(1).map(|index| ProductType::ALL[index]);

        let year = terminal::prompt_parsed("Ano", current.period.year(), |year: &i32| {
            if (MIN_YEAR..=MAX_YEAR).contains(year) {
                Ok(())
            } else {
                Err(format!("Ano deve estar entre {MIN_YEAR} e {MAX_YEAR}"))
            }
        })?;

        let month_labels: Vec<String> = (1..=12)
            .map(|month| Period::new(year, month).map(|period| period.month_label()))
            .collect::<Result<_, LedgerError>>()?;
        let month_index =
            terminal::select("Mês", &month_labels, current.period.month() as usize - 1)?;
        let period = Period::new(year, month_index as u32 + 1)?;

        let clients = self.session.client_choices();
        let mut client_labels = vec![WILDCARD_LABEL.to_string()];
        client_labels.extend(clients.iter().cloned());
        let client_default = current
            .client
            .as_ref()
            .and_then(|current| clients.iter().position(|client| client == current))
            .map(|index| index + 1)
            .unwrap_or(0);
        let client_index = terminal::select("Cliente", &client_labels, client_default)?;
        let client = client_index.checked_sub(1).map(|index| clients[index].clone());

        self.session.set_filter(
            Filter::new(period)
                .with_product_type(product_type)
                .with_client(client),
        );
        self.main_report()
    }

    fn main_edit_records(&mut self) -> Result<()> {
        let current = String::from_utf8(crate::export::csv_bytes(
            &self.session.filtered_records(),
        )?)?;
        let Some(edited) = terminal::edit(&current)? else {
            println!("You did not save the edits, nothing was changed.");
            return Ok(());
        };
        if edited == current {
            println!("No changes.");
            return Ok(());
        }
        let summary = self.session.save_edited_csv(&edited, today())?;
        println!(
            "{}",
            style_success(&format!(
                "Alterações salvas: {} registro(s) substituído(s) por {}.",
                summary.removed, summary.inserted
            ))
        );
        Ok(())
    }

    fn main_add_record(&mut self) -> Result<()> {
        let today = today();
        let date = terminal::prompt_parsed(
            "Data",
            today.format("%Y-%m-%d").to_string(),
            |value: &String| {
                parse_date(value)
                    .map(|_| ())
                    .ok_or_else(|| "Use the format YYYY-MM-DD".to_string())
            },
        )?;
        let date = parse_date(&date).unwrap_or(today);

        let type_labels: Vec<_> = ProductType::ALL.iter().map(ProductType::label).collect();
        let product_type = ProductType::ALL[terminal::select("Tipo do produto", &type_labels, 0)?];

        let units = product_type.allowed_units();
        let unit_labels: Vec<_> = units.iter().map(|unit| unit.label()).collect();
        let unit = units[terminal::select("Unidade", &unit_labels, 0)?];

        let quantity = terminal::prompt_parsed("Quantidade", Decimal::ZERO, |value: &Decimal| {
            if value.is_sign_negative() {
                Err("Quantidade não pode ser negativa".to_string())
            } else if *value > MAX_QUANTITY {
                Err(format!("Quantidade não pode passar de {MAX_QUANTITY}"))
            } else {
                Ok(())
            }
        })?;

        let client = terminal::prompt_allow_empty("Cliente")?;

        let status_labels: Vec<_> = Status::ALL.iter().map(Status::label).collect();
        let status = Status::ALL[terminal::select("Status", &status_labels, 0)?];

        self.session.add_record(Record::new(
            date,
            product_type,
            client,
            unit,
            quantity,
            status,
        ))?;
        println!("{}", style_success("Registro adicionado!"));
        Ok(())
    }

    fn main_import_csv(&mut self) -> Result<()> {
        println!("Formato esperado: Data,Tipo,Cliente,Unidade,Quantidade,Status");
        let path = PathBuf::from(terminal::prompt("CSV file")?);
        let count = import_file(&mut self.session, &path)?;
        println!(
            "{}",
            style_success(&format!("Importado {count} linha(s)!"))
        );
        Ok(())
    }

    pub fn main_export_csv(&self, out_dir: &Path) -> Result<()> {
        let file = self.session.csv_export()?;
        let path = file.write_to(out_dir)?;
        println!(
            "{}",
            style_success(&format!("Exported {}", path.display()))
        );
        Ok(())
    }

    pub fn main_export_ranking(&self, out_dir: &Path) -> Result<()> {
        let file = self.session.ranking_export(&self.renderer)?;
        let path = file.write_to(out_dir)?;
        println!(
            "{}",
            style_success(&format!("Exported {}", path.display()))
        );
        Ok(())
    }
}

fn print_view<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, view: &DashboardView) {
    printer.print_item(style_header(&format!("Lançamentos: {}", view.filter)));
    let records = printer.indent();
    if view.is_empty() {
        records.print_item(style(NO_RECORDS).italic());
        return;
    }
    records.print_items(view.records.iter().map(format_record), style("(none)").italic());
    records.print_item(style(format!("Total: {}", view.total)).bold());

    printer.print_item(style_header("Acumulado do período"));
    printer
        .indent()
        .print_items(view.accumulation.iter().map(format_point), NO_RECORDS);

    printer.print_item(style_header("Ranking por Cliente"));
    let max = view
        .ranking
        .first()
        .map(|total| total.total)
        .unwrap_or(Decimal::ZERO);
    printer.indent().print_items(
        view.ranking.iter().map(|total| format_ranking_row(total, max)),
        NO_RECORDS,
    );
}

fn format_record(record: &Record) -> String {
    format!(
        "{} {} {} {} {}",
        style_date(&record.date),
        pad_str(record.product_type_label(), 6, Alignment::Left, None),
        pad_str(&style_client(&record.client).to_string(), 28, Alignment::Left, None),
        pad_str(
            &style_quantity(&record.quantity, record.unit_label()).to_string(),
            16,
            Alignment::Right,
            None
        ),
        style_status(record.status),
    )
}

fn format_point(point: &AccumulatedPoint) -> String {
    format!(
        "{} {} {}",
        style_date(&point.date),
        pad_str(&format!("+{}", point.quantity), 12, Alignment::Right, None),
        style(format!("= {}", point.cumulative)).bold(),
    )
}

fn format_ranking_row(total: &ClientTotal, max: Decimal) -> String {
    format!(
        "{} {} {}",
        pad_str(&style_client(&total.client).to_string(), 28, Alignment::Left, None),
        style(bar(total.total, max, BAR_WIDTH)).blue(),
        total.total,
    )
}

/// A horizontal bar, `width` characters long for `max`.
fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0);
    let length = ((ratio * width as f64).round() as usize).max(1);
    "█".repeat(length)
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_date(date: &NaiveDate) -> StyledObject<String> {
    style(date.format("%Y-%m-%d").to_string())
}

fn style_client(client: &str) -> StyledObject<&str> {
    style(client).cyan()
}

fn style_quantity(quantity: &Decimal, unit: &str) -> StyledObject<String> {
    style(format!("{} {}", quantity, unit)).bold()
}

fn style_status(status: Status) -> StyledObject<&'static str> {
    match status {
        Status::Ok => style(status.label()).green(),
        Status::Verifying => style(status.label()).yellow(),
    }
}

fn style_success(message: &str) -> StyledObject<&str> {
    style(message).green()
}

fn style_error(message: &str) -> StyledObject<&str> {
    style(message).red().bold()
}
