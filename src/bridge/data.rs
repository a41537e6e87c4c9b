use thiserror::Error;

/// One status report for a single stall, as the Arduino sends it:
/// `<location_id>,<stall_id>,<remaining_percentage>,<is_stolen>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StallStatus {
    pub location_id: String,
    pub stall_id: String,
    pub remaining_percentage: i64,
    pub is_stolen: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 4 comma-separated fields, found {0}")]
    WrongFieldCount(usize),

    #[error("remaining percentage {0:?} is not an integer")]
    BadPercentage(String),
}

/// Parse one trimmed serial line into a [`StallStatus`].
///
/// Fields are not trimmed individually. The theft flag is true only for
/// the exact literal `true`; any other spelling ("TRUE", "1", " true")
/// reads as false, matching what the firmware actually emits.
pub fn parse_line(line: &str) -> Result<StallStatus, ParseError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 4 {
        return Err(ParseError::WrongFieldCount(parts.len()));
    }

    let remaining_percentage: i64 = parts[2]
        .parse()
        .map_err(|_| ParseError::BadPercentage(parts[2].to_string()))?;

    Ok(StallStatus {
        location_id: parts[0].to_string(),
        stall_id: parts[1].to_string(),
        remaining_percentage,
        is_stolen: parts[3] == "true",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_line() {
        let status = parse_line("1F-A-male,stall-01,80,true").unwrap();
        assert_eq!(
            status,
            StallStatus {
                location_id: "1F-A-male".to_string(),
                stall_id: "stall-01".to_string(),
                remaining_percentage: 80,
                is_stolen: true,
            }
        );
    }

    #[test]
    fn false_flag_parses_as_false() {
        let status = parse_line("x,y,50,false").unwrap();
        assert_eq!(status.remaining_percentage, 50);
        assert!(!status.is_stolen);
    }

    #[test]
    fn theft_flag_requires_the_exact_literal() {
        assert!(!parse_line("a,b,10,TRUE").unwrap().is_stolen);
        assert!(!parse_line("a,b,10,1").unwrap().is_stolen);
        assert!(!parse_line("a,b,10, true").unwrap().is_stolen);
        assert!(parse_line("a,b,10,true").unwrap().is_stolen);
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert_eq!(parse_line("a,b"), Err(ParseError::WrongFieldCount(2)));
        assert_eq!(
            parse_line("a,b,10,true,extra"),
            Err(ParseError::WrongFieldCount(5))
        );
    }

    #[test]
    fn rejects_non_integer_percentage() {
        assert_eq!(
            parse_line("a,b,c,true"),
            Err(ParseError::BadPercentage("c".to_string()))
        );
        assert_eq!(
            parse_line("a,b,12.5,true"),
            Err(ParseError::BadPercentage("12.5".to_string()))
        );
    }

    #[test]
    fn location_and_stall_ids_pass_through_untouched() {
        let status = parse_line(" 2F-B-female ,stall 07,0,false").unwrap();
        assert_eq!(status.location_id, " 2F-B-female ");
        assert_eq!(status.stall_id, "stall 07");
        assert_eq!(status.remaining_percentage, 0);
    }
}
