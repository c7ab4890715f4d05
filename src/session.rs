use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::export::{self, RankingRenderer};
use crate::import;
use crate::ledger::{Filter, Ledger, MergeSummary, Period, Record};
use crate::operations::{self, AccumulatedPoint, ClientTotal};

/// Everything shown for the active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub filter: Filter,
    pub records: Vec<Record>,
    pub accumulation: Vec<AccumulatedPoint>,
    pub ranking: Vec<ClientTotal>,
    pub total: Decimal,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A file produced by one of the export actions, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ExportFile {
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.content.len());
        Ok(path)
    }
}

/// One operator session: the ledger, the active filter and the settings.
///
/// All state lives here and is gone when the session is dropped.
#[derive(Debug, Clone)]
pub struct Session {
    ledger: Ledger,
    filter: Filter,
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        let ledger = if config.seed {
            let ledger = Ledger::new_seeded();
            log::info!("Starting session with {} seed record(s)", ledger.len());
            ledger
        } else {
            log::info!("Starting session with an empty ledger");
            Ledger::new_empty()
        };
        Self::with_ledger(config, ledger)
    }

    pub fn with_ledger(config: Config, ledger: Ledger) -> Result<Self> {
        let period = Period::new(config.default_year, config.default_month)?;
        Ok(Self {
            ledger,
            filter: Filter::new(period),
            config,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_filter(&mut self, filter: Filter) {
        log::debug!("Filter changed to {}", filter);
        self.filter = filter;
    }

    /// Values offered by the Client selector, besides the wildcard.
    pub fn client_choices(&self) -> Vec<String> {
        self.ledger
            .clients()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn filtered_records(&self) -> Vec<Record> {
        self.ledger
            .filter(&self.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn view(&self) -> Result<DashboardView> {
        let records = self.ledger.filter(&self.filter);
        log::debug!("Recomputing view for {}: {} record(s)", self.filter, records.len());
        Ok(DashboardView {
            filter: self.filter.clone(),
            accumulation: operations::accumulate(records.iter().copied())?,
            ranking: operations::rank_by_client(records.iter().copied())?,
            total: operations::total_quantity(records.iter().copied())?,
            records: records.into_iter().cloned().collect(),
        })
    }

    /// Replaces the records of the active view with `replacement`.
    pub fn save_edits(&mut self, replacement: Vec<Record>) -> MergeSummary {
        self.ledger.merge_back(&self.filter, replacement)
    }

    /// Like [`Session::save_edits`], with the edited view given as CSV text.
    pub fn save_edited_csv(&mut self, content: &str, today: NaiveDate) -> Result<MergeSummary> {
        let replacement = import::load(content.as_bytes(), today)?;
        Ok(self.save_edits(replacement))
    }

    pub fn add_record(&mut self, record: Record) -> Result<()> {
        match self.ledger.append(record) {
            Ok(()) => {
                log::info!("Added record, ledger now has {} record(s)", self.ledger.len());
                Ok(())
            }
            Err(err) => {
                log::warn!("Record not added: {}", err);
                Err(err)
            }
        }
    }

    /// Imports a CSV file. The ledger is left untouched if any row is rejected.
    pub fn import_csv(&mut self, input_stream: impl Read, today: NaiveDate) -> Result<usize> {
        let records = match import::load(input_stream, today) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("{}", err);
                return Err(err);
            }
        };
        let count = self.ledger.extend(records);
        log::info!("Imported {} record(s)", count);
        Ok(count)
    }

    pub fn csv_export(&self) -> Result<ExportFile> {
        let records = self.ledger.filter(&self.filter);
        if records.is_empty() {
            return Err(no_records_to_export());
        }
        Ok(ExportFile {
            file_name: export::csv_file_name(self.filter.period),
            content: export::csv_bytes(records)?,
        })
    }

    pub fn ranking_title(&self) -> String {
        export::ranking_title(&self.config.brand, self.filter.period)
    }

    pub fn ranking_export(&self, renderer: &impl RankingRenderer) -> Result<ExportFile> {
        let records = self.ledger.filter(&self.filter);
        if records.is_empty() {
            return Err(no_records_to_export());
        }
        let ranking = operations::rank_by_client(records)?;
        Ok(ExportFile {
            file_name: export::ranking_file_name(self.filter.period, renderer.file_extension()),
            content: renderer.render(&self.ranking_title(), &ranking)?,
        })
    }
}

fn no_records_to_export() -> LedgerError {
    LedgerError::validation("Nenhum registro encontrado com os filtros selecionados.")
}
