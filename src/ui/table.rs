use tabled::{settings::{object::Columns, Alignment, Modify, Style}, Table, Tabled};
use crate::standings::Standing;
use crate::ui::icons::medal;

#[derive(Tabled)]
pub struct StandingsRow {
    #[tabled(rename = "Pos")]
    pub rank: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Points")]
    pub points: i64,
}

impl From<&Standing> for StandingsRow {
    fn from(standing: &Standing) -> Self {
        let rank = match medal(standing.rank) {
            "" => standing.rank.to_string(),
            icon => format!("{} {}", standing.rank, icon),
        };
        Self {
            rank,
            name: standing.name.clone(),
            points: standing.points,
        }
    }
}

/// Render a standings table, empty string when there is nothing to show
pub fn standings_table(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return String::new();
    }

    let rows: Vec<StandingsRow> = standings.iter().map(StandingsRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string()
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    let rows: Vec<StatsRow> = stats
        .iter()
        .map(|(label, value)| StatsRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_table_contents() {
        let standings = vec![
            Standing { rank: 1, name: "Driver1".into(), points: 25 },
            Standing { rank: 4, name: "Driver4".into(), points: 12 },
        ];
        let table = standings_table(&standings);
        assert!(table.contains("Driver1"));
        assert!(table.contains("25"));
        assert!(table.contains("Points"));
    }

    #[test]
    fn test_empty_standings_table() {
        assert!(standings_table(&[]).is_empty());
    }
}
