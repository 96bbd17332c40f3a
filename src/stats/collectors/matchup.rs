use super::super::{CollectedData, Outcome, StatCollector};
use crate::games::GameRecord;
use crate::players::PlayerId;

/// Groups a subject's games by opponent id
pub struct MatchupCollector {
    subject: PlayerId,
}

impl MatchupCollector {
    pub fn new(subject: PlayerId) -> Self {
        Self { subject }
    }
}

impl StatCollector for MatchupCollector {
    type Key = PlayerId;

    fn collect(&self, game: &GameRecord) -> Vec<CollectedData<PlayerId>> {
        match (
            game.opponent_of(self.subject),
            Outcome::for_player(game, self.subject),
        ) {
            (Some(opponent), Some(outcome)) => vec![CollectedData::new(opponent, outcome)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::GameFormat;

    fn game(winner_id: PlayerId, loser_id: PlayerId) -> GameRecord {
        GameRecord {
            id: 1,
            winner_id,
            loser_id,
            format: GameFormat::Draft,
            edition: None,
            winner_colors: None,
            loser_colors: None,
            played_at: None,
        }
    }

    #[test]
    fn test_subject_win_and_loss() {
        let collector = MatchupCollector::new(1);

        assert_eq!(
            collector.collect(&game(1, 2)),
            vec![CollectedData::new(2, Outcome::Win)]
        );
        assert_eq!(
            collector.collect(&game(3, 1)),
            vec![CollectedData::new(3, Outcome::Loss)]
        );
    }

    #[test]
    fn test_games_without_subject_are_ignored() {
        assert!(MatchupCollector::new(1).collect(&game(2, 3)).is_empty());
    }
}
