use crate::standings::Standing;
use crate::ui::icons::medal;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(icon: &str, text: &str) {
    println!();
    println!("{} {}", icon, text.style(theme().title.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().loaded.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO,
        label.style(theme().label.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().title.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// Notice for an entity created on first reference
pub fn created(kind: &str, name: &str, detail: Option<&str>) {
    match detail {
        Some(detail) => println!(
            "{} {} created: {} {}",
            Icons::NEW,
            kind,
            name.style(theme().created.clone()),
            dim(&format!("({})", detail))
        ),
        None => println!("{} {} created: {}", Icons::NEW, kind, name.style(theme().created.clone())),
    }
}

pub fn file_started(path: &str) {
    println!("{} Processing {} ...", Icons::FOLDER, path.style(theme().label.clone()));
}

pub fn file_loaded(path: &str, rows: usize, skipped: usize) {
    let detail = if skipped > 0 {
        format!("{} rows, {} skipped", rows, skipped)
    } else {
        format!("{} rows", rows)
    };
    println!(
        "{} Results loaded from {} {}",
        Icons::CHECK,
        path.style(theme().loaded.clone()),
        dim(&format!("({})", detail))
    );
}

/// One line naming the championship leader, nothing for empty standings
pub fn leader_line(standings: &[Standing]) -> Option<String> {
    let first = standings.first()?;
    let name = match theme().for_rank(first.rank) {
        Some(style) => first.name.style(style.clone()).to_string(),
        None => first.name.clone(),
    };
    Some(format!("{} Leader: {} {}", medal(first.rank), name, dim(&format!("({} pts)", first.points))))
}

pub fn leader(standings: &[Standing]) {
    if let Some(line) = leader_line(standings) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_line() {
        let standings = vec![
            Standing { rank: 1, name: "Driver1".into(), points: 43 },
            Standing { rank: 2, name: "Driver2".into(), points: 40 },
        ];
        let line = leader_line(&standings).unwrap();
        assert!(line.contains("Leader"));
        assert!(line.contains("Driver1"));
        assert!(line.contains("43 pts"));
        assert!(!line.contains("Driver2"));
    }

    #[test]
    fn test_no_leader_without_results() {
        assert!(leader_line(&[]).is_none());
    }
}
