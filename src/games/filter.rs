use chrono::NaiveDate;
use serde::Deserialize;

use super::models::{Edition, GameFormat, GameRecord};
use crate::players::PlayerId;
use crate::shared::AppError;

/// Label the UI sends for "no restriction" on a categorical filter
const ALL_LABEL: &str = "All";

/// Restriction on a game's edition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditionFilter {
    #[default]
    Any,
    /// Only games with no edition recorded
    Unset,
    Only(Edition),
}

impl EditionFilter {
    /// "All" or absent means any edition; "None" or blank means unset
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => EditionFilter::Any,
            Some(label) if label.eq_ignore_ascii_case(ALL_LABEL) => EditionFilter::Any,
            Some(label) => match Edition::parse(label) {
                Some(edition) => EditionFilter::Only(edition),
                None => EditionFilter::Unset,
            },
        }
    }

    pub fn matches(&self, edition: Option<&Edition>) -> bool {
        match self {
            EditionFilter::Any => true,
            EditionFilter::Unset => edition.is_none(),
            EditionFilter::Only(wanted) => edition == Some(wanted),
        }
    }
}

/// Date, edition and format restrictions shared by every stats view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Inclusive lower bound on the UTC play date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the UTC play date
    pub end_date: Option<NaiveDate>,
    pub edition: EditionFilter,
    pub format: Option<GameFormat>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn from_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_edition(mut self, edition: EditionFilter) -> Self {
        self.edition = edition;
        self
    }

    pub fn with_format(mut self, format: GameFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Decides whether a single game passes every restriction.
    /// Games without a usable timestamp fail any date-bounded filter.
    pub fn matches(&self, game: &GameRecord) -> bool {
        if self.has_date_bounds() {
            let Some(played_on) = game.played_on() else {
                return false;
            };
            if self.start_date.is_some_and(|start| played_on < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| played_on > end) {
                return false;
            }
        }

        if self.format.is_some_and(|format| game.format != format) {
            return false;
        }

        self.edition.matches(game.edition.as_ref())
    }

    pub fn apply<'a>(&'a self, games: &'a [GameRecord]) -> impl Iterator<Item = &'a GameRecord> {
        games.iter().filter(move |game| self.matches(game))
    }
}

/// Filters for the match history view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub filter: GameFilter,
    /// Only games this player won or lost
    pub player_id: Option<PlayerId>,
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn matches(&self, game: &GameRecord) -> bool {
        self.player_id.map_or(true, |player| game.involves(player)) && self.filter.matches(game)
    }

    /// Filters, orders newest first and truncates. Games without a timestamp sort last.
    pub fn select(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let mut selected: Vec<GameRecord> =
            games.iter().filter(|g| self.matches(g)).cloned().collect();
        selected.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Query-string form of [`GameFilter`]
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub edition: Option<String>,
    pub format: Option<String>,
}

impl TryFrom<FilterParams> for GameFilter {
    type Error = AppError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let format = match params.format.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) if label.eq_ignore_ascii_case(ALL_LABEL) => None,
            Some(label) => Some(GameFormat::try_from(label.to_string())?),
        };

        Ok(GameFilter {
            start_date: params.start_date,
            end_date: params.end_date,
            edition: EditionFilter::parse(params.edition.as_deref()),
            format,
        })
    }
}
