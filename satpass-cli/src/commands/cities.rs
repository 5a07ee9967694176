//! Cities command - list the built-in observer catalog.

use std::fmt::Write as _;

use satpass::observer::CITIES;

use super::common::write_output;
use crate::error::CliError;

/// Run the cities command.
pub fn run() -> Result<(), CliError> {
    write_output(&render())
}

pub fn render() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12}  {:>9}  {:>10}", "City", "Latitude", "Longitude");
    for city in CITIES {
        let _ = writeln!(
            out,
            "{:<12}  {:>9.4}  {:>10.4}",
            city.name, city.latitude_deg, city.longitude_deg
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_city() {
        let text = render();
        assert_eq!(text.lines().count(), CITIES.len() + 1);
        assert!(text.contains("Delhi"));
        assert!(text.contains("Hyderabad"));
    }
}
