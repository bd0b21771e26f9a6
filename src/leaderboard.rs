/// Pet hiscores
///
/// Groups players by obtained pet count and ranks the highest
/// distinct counts. Players sharing a count share a rank.
///
/// Only `(username, pet_count)` pairs are kept, never full
/// records.
#[derive(Debug, Default)]
pub struct PetLeaderboard {
    entries: Vec<(String, usize)>,
}

/// One rank: a pet count and every player who has exactly that many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub rank: usize,
    pub pets: usize,
    pub players: Vec<String>,
}

impl PetLeaderboard {
    pub fn record(&mut self, username: &str, pets: usize) {
        self.entries.push((username.to_string(), pets));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `size` distinct counts, highest first. Players keep
    /// the order they were recorded in.
    pub fn top(&self, size: usize) -> Vec<Rank> {
        let mut counts: Vec<usize> = self.entries.iter().map(|(_, pets)| *pets).collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts.dedup();

        counts
            .into_iter()
            .take(size)
            .enumerate()
            .map(|(i, pets)| Rank {
                rank: i + 1,
                pets,
                players: self
                    .entries
                    .iter()
                    .filter(|(_, n)| *n == pets)
                    .map(|(name, _)| name.clone())
                    .collect(),
            })
            .collect()
    }
}

impl Rank {
    pub fn line(&self) -> String {
        format!("#{} ({} pets): {}", self.rank, self.pets, self.players.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_a_rank() {
        let mut board = PetLeaderboard::default();
        board.record("Zezima", 3);
        board.record("Woox", 7);
        board.record("Lynx Titan", 3);
        board.record("B0aty", 1);

        let top = board.top(5);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].players, ["Woox"]);
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].players, ["Zezima", "Lynx Titan"]);
        assert_eq!(top[2].line(), "#3 (1 pets): B0aty");
    }

    #[test]
    fn only_the_requested_number_of_counts() {
        let mut board = PetLeaderboard::default();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            board.record(name, i);
        }

        let pets: Vec<usize> = board.top(5).iter().map(|r| r.pets).collect();
        assert_eq!(pets, [6, 5, 4, 3, 2]);
    }

    #[test]
    fn empty_board_has_no_ranks() {
        let board = PetLeaderboard::default();
        assert!(board.is_empty());
        assert!(board.top(5).is_empty());
    }
}
