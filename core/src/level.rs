use alloc::vec::Vec;
use serde::Serialize;

use crate::*;

pub trait PatternGenerator {
    fn generate(&self) -> CellSet;
}

/// Rule deciding which cells flash for a level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PatternRule {
    /// `index % 2 == 0`
    EvenIndices,
    /// Both diagonals, `row == col` or `row + col == 4`
    Diagonals,
    /// Prime indices
    Primes,
    /// Center cell and its four orthogonal neighbors
    CenterCluster,
    /// `(row + col) % 3 == 0`
    ModuloStripes,
    /// Caller-provided cells
    Fixed(CellSet),
}

impl PatternGenerator for PatternRule {
    fn generate(&self) -> CellSet {
        use PatternRule::*;
        match *self {
            EvenIndices => CellSet::from_fn(|i| i % 2 == 0),
            Diagonals => CellSet::from_fn(|i| {
                let (row, col) = to_coords(i);
                row == col || row + col == GRID_SIDE - 1
            }),
            Primes => CellSet::from_fn(is_prime),
            CenterCluster => CellSet::from_fn(|i| matches!(i, 7 | 11 | 12 | 13 | 17)),
            ModuloStripes => CellSet::from_fn(|i| (row_of(i) + col_of(i)) % 3 == 0),
            Fixed(cells) => cells,
        }
    }
}

/// Trial division up to the square root, 0 and 1 are not prime.
pub const fn is_prime(n: u8) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u16;
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Level {
    pub name: &'static str,
    pub description: &'static str,
    pub hint: &'static str,
    pub rule: PatternRule,
}

impl Level {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        hint: &'static str,
        rule: PatternRule,
    ) -> Self {
        Self {
            name,
            description,
            hint,
            rule,
        }
    }

    /// Cells that flash for this level, always the same set for the same level.
    pub fn pattern(&self) -> CellSet {
        self.rule.generate()
    }
}

impl PatternGenerator for Level {
    fn generate(&self) -> CellSet {
        self.pattern()
    }
}

pub const STANDARD_LEVELS: [Level; 5] = [
    Level::new(
        "Even Indices",
        "Flash squares whose index is even",
        "Look for squares at even positions (0, 2, 4, 6...)",
        PatternRule::EvenIndices,
    ),
    Level::new(
        "Diagonals",
        "Flash squares where row equals column, or row plus column is 4",
        "The pattern forms an X shape across the grid",
        PatternRule::Diagonals,
    ),
    Level::new(
        "Primes",
        "Flash squares whose index is a prime number",
        "Prime numbers are only divisible by 1 and themselves (2, 3, 5, 7, 11...)",
        PatternRule::Primes,
    ),
    Level::new(
        "Center Cluster",
        "Flash the center square and its 4 direct neighbors",
        "Focus on the very center of the grid and its adjacent cells",
        PatternRule::CenterCluster,
    ),
    Level::new(
        "Modulo Stripes",
        "Flash squares where (row + col) % 3 is 0",
        "The pattern forms diagonal stripes across the grid",
        PatternRule::ModuloStripes,
    ),
];

/// Ordered, non-empty list of levels played in sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self { levels })
    }

    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    pub fn level_at(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.levels.len()
    }

    pub fn first(&self) -> &Level {
        // non-empty by construction
        &self.levels[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn pattern_of(index: usize) -> Vec<CellIndex> {
        LevelCatalog::standard()
            .level_at(index)
            .unwrap()
            .pattern()
            .iter()
            .collect()
    }

    #[test]
    fn even_indices_has_thirteen_cells() {
        assert_eq!(
            pattern_of(0),
            [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]
        );
    }

    #[test]
    fn diagonals_form_an_x() {
        assert_eq!(pattern_of(1), [0, 4, 6, 8, 12, 16, 18, 20, 24]);
    }

    #[test]
    fn primes_below_twenty_five() {
        assert_eq!(pattern_of(2), [2, 3, 5, 7, 11, 13, 17, 19, 23]);
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(25));
        assert!(is_prime(251));
    }

    #[test]
    fn center_cluster_is_plus_shape() {
        assert_eq!(pattern_of(3), [7, 11, 12, 13, 17]);
    }

    #[test]
    fn modulo_stripes_follow_row_plus_col() {
        assert_eq!(pattern_of(4), [0, 3, 7, 11, 14, 15, 18, 22]);
    }

    #[test]
    fn every_standard_pattern_is_stable_and_non_empty() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.count(), 5);

        for level in catalog.iter() {
            let first = level.pattern();
            assert_eq!(first, level.pattern(), "{} changed between calls", level.name);
            assert!(!first.is_empty(), "{} is empty", level.name);
            assert!(first.iter().all(is_valid_index));
        }
    }

    #[test]
    fn catalog_rejects_empty_level_list() {
        assert_eq!(LevelCatalog::new(vec![]), Err(GameError::EmptyCatalog));
    }

    #[test]
    fn catalog_addresses_levels_by_index() {
        let catalog = LevelCatalog::standard();

        assert_eq!(catalog.first().name, "Even Indices");
        assert_eq!(catalog.level_at(3).map(|l| l.name), Some("Center Cluster"));
        assert!(catalog.level_at(5).is_none());
        assert!(catalog.is_last(4));
        assert!(!catalog.is_last(3));
    }
}
