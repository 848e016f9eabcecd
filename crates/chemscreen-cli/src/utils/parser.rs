use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid oxidation state '{token}' in site {site}.")]
    InvalidState { site: usize, token: String },

    #[error("Oxidation state 0 is not allowed (site {site}).")]
    ZeroState { site: usize },

    #[error("Site {site} lists no oxidation states.")]
    EmptySite { site: usize },
}

/// Parses `"1,2;4,5;-2"` into one oxidation-state list per site.
///
/// Sites are separated by `;` and states within a site by `,`. Site numbers in errors are
/// 1-based.
pub fn parse_site_states(input: &str) -> Result<Vec<Vec<i32>>, ParseError> {
    input
        .split(';')
        .enumerate()
        .map(|(idx, site)| {
            let site_number = idx + 1;
            let states = site
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    let state = token.parse::<i32>().map_err(|_| ParseError::InvalidState {
                        site: site_number,
                        token: token.to_string(),
                    })?;
                    if state == 0 {
                        return Err(ParseError::ZeroState { site: site_number });
                    }
                    Ok(state)
                })
                .collect::<Result<Vec<_>, _>>()?;
            if states.is_empty() {
                return Err(ParseError::EmptySite { site: site_number });
            }
            Ok(states)
        })
        .collect()
}
