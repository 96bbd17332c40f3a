use super::super::{CollectedData, Outcome, StatCollector};
use crate::games::{Color, ColorSet, GameRecord};
use crate::players::PlayerId;

/// The subject's side of a game, if it can feed color statistics.
///
/// Requires the subject to have played, their side's color data to be well
/// formed, and at least one side of the game to have recorded a color.
fn subject_side(game: &GameRecord, subject: PlayerId) -> Option<(&ColorSet, Outcome)> {
    if !game.has_color_data() {
        return None;
    }
    let colors = game.colors_for(subject)?;
    let outcome = Outcome::for_player(game, subject)?;
    Some((colors, outcome))
}

/// Counts each color on the subject's side separately.
/// A two-color deck contributes to both colors.
pub struct ColorCollector {
    subject: PlayerId,
}

impl ColorCollector {
    pub fn new(subject: PlayerId) -> Self {
        Self { subject }
    }
}

impl StatCollector for ColorCollector {
    type Key = Color;

    fn collect(&self, game: &GameRecord) -> Vec<CollectedData<Color>> {
        match subject_side(game, self.subject) {
            Some((colors, outcome)) => colors
                .iter()
                .map(|color| CollectedData::new(color, outcome))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Counts the subject's whole color set as one key; an empty set is "Colorless"
pub struct ColorCombinationCollector {
    subject: PlayerId,
}

impl ColorCombinationCollector {
    pub fn new(subject: PlayerId) -> Self {
        Self { subject }
    }
}

impl StatCollector for ColorCombinationCollector {
    type Key = String;

    fn collect(&self, game: &GameRecord) -> Vec<CollectedData<String>> {
        match subject_side(game, self.subject) {
            Some((colors, outcome)) => vec![CollectedData::new(colors.combination_key(), outcome)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{models::COLORLESS_KEY, GameFormat};

    fn colors(list: &[Color]) -> Option<ColorSet> {
        Some(list.iter().copied().collect())
    }

    fn game(
        winner_id: PlayerId,
        loser_id: PlayerId,
        winner_colors: Option<ColorSet>,
        loser_colors: Option<ColorSet>,
    ) -> GameRecord {
        GameRecord {
            id: 1,
            winner_id,
            loser_id,
            format: GameFormat::Draft,
            edition: None,
            winner_colors,
            loser_colors,
            played_at: None,
        }
    }

    #[test]
    fn test_two_color_win_counts_for_each_color() {
        let g = game(1, 2, colors(&[Color::Blue, Color::Red]), colors(&[Color::Green]));

        let data = ColorCollector::new(1).collect(&g);
        assert_eq!(
            data,
            vec![
                CollectedData::new(Color::Blue, Outcome::Win),
                CollectedData::new(Color::Red, Outcome::Win),
            ]
        );

        let data = ColorCombinationCollector::new(1).collect(&g);
        assert_eq!(
            data,
            vec![CollectedData::new("Blue, Red".to_string(), Outcome::Win)]
        );
    }

    #[test]
    fn test_only_subject_side_counts() {
        let g = game(2, 1, colors(&[Color::Red]), colors(&[Color::Blue]));

        let data = ColorCollector::new(1).collect(&g);
        assert_eq!(data, vec![CollectedData::new(Color::Blue, Outcome::Loss)]);
    }

    #[test]
    fn test_empty_subject_side() {
        let g = game(1, 2, colors(&[]), colors(&[Color::Black]));

        assert!(ColorCollector::new(1).collect(&g).is_empty());
        assert_eq!(
            ColorCombinationCollector::new(1).collect(&g),
            vec![CollectedData::new(COLORLESS_KEY.to_string(), Outcome::Win)]
        );
    }

    #[test]
    fn test_games_without_any_colors_are_skipped() {
        let g = game(1, 2, colors(&[]), colors(&[]));

        assert!(ColorCollector::new(1).collect(&g).is_empty());
        assert!(ColorCombinationCollector::new(1).collect(&g).is_empty());
    }

    #[test]
    fn test_malformed_subject_side_is_skipped() {
        let g = game(1, 2, None, colors(&[Color::White]));

        assert!(ColorCollector::new(1).collect(&g).is_empty());
        assert!(ColorCombinationCollector::new(1).collect(&g).is_empty());
        assert_eq!(ColorCollector::new(2).collect(&g).len(), 1);
    }

    #[test]
    fn test_non_participant_contributes_nothing() {
        let g = game(1, 2, colors(&[Color::Blue]), colors(&[Color::Red]));
        assert!(ColorCollector::new(3).collect(&g).is_empty());
    }
}
