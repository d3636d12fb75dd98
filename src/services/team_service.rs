use rand::Rng;
use tracing::{debug, info};
use validator::ValidationErrors;

use crate::{
    dto::validation::validate_not_blank,
    error::{GameshowError, GameshowResult},
    state::{
        Gameshow,
        game::{LeaderboardEntry, Team},
    },
};

/// Symbols a team code is drawn from.
pub const TEAM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Number of symbols in a team code.
pub const TEAM_CODE_LENGTH: usize = 5;

/// Result of a successful join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The member was added to the team.
    Joined(Team),
    /// The member already belonged to the team; nothing changed.
    AlreadyMember(Team),
}

impl JoinOutcome {
    /// Team as stored after the request.
    pub fn team(&self) -> &Team {
        match self {
            JoinOutcome::Joined(team) | JoinOutcome::AlreadyMember(team) => team,
        }
    }
}

/// Draw codes from `rng` until one is not `taken`.
pub fn generate_team_code<R, F>(rng: &mut R, taken: F) -> String
where
    R: Rng,
    F: Fn(&str) -> bool,
{
    loop {
        let code: String = (0..TEAM_CODE_LENGTH)
            .map(|_| TEAM_CODE_ALPHABET[rng.random_range(0..TEAM_CODE_ALPHABET.len())] as char)
            .collect();
        if !taken(&code) {
            return code;
        }
        debug!(%code, "team code collision; drawing again");
    }
}

/// Trim and upper-case a code typed by a human.
pub fn normalize_team_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Create a team captained by `captain_code` and give it a leaderboard entry.
pub fn create_team(gs: &mut Gameshow, name: &str, captain_code: &str) -> GameshowResult<Team> {
    let mut errors = ValidationErrors::new();
    if let Err(err) = validate_not_blank(name) {
        errors.add("name", err);
    }
    if let Err(err) = validate_not_blank(captain_code) {
        errors.add("captain_code", err);
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let code = generate_team_code(&mut rand::rng(), |candidate| {
        gs.snapshot().teams.contains_key(candidate)
    });
    let team = Team::new(code, name.to_owned(), captain_code.to_owned());

    gs.mutate(|snapshot| {
        snapshot
            .leaderboard
            .insert(team.code.clone(), LeaderboardEntry::new(team.name.clone()));
        snapshot.teams.insert(team.code.clone(), team.clone());
        Ok(())
    })?;

    info!(team = %team.code, name = %team.name, "team created");
    Ok(team)
}

/// Add `member_code` to a team. Joining twice is a successful no-op.
pub fn join_team(
    gs: &mut Gameshow,
    team_code: &str,
    member_code: &str,
) -> GameshowResult<JoinOutcome> {
    let team_code = normalize_team_code(team_code);
    let team = gs
        .snapshot()
        .teams
        .get(&team_code)
        .ok_or_else(|| GameshowError::TeamNotFound(team_code.clone()))?;

    if team.has_member(member_code) {
        debug!(team = %team_code, member = %member_code, "member already in team");
        return Ok(JoinOutcome::AlreadyMember(team.clone()));
    }

    let team = gs.mutate(|snapshot| {
        let team = snapshot
            .teams
            .get_mut(&team_code)
            .ok_or_else(|| GameshowError::TeamNotFound(team_code.clone()))?;
        team.members.push(member_code.to_owned());
        Ok(team.clone())
    })?;

    info!(team = %team_code, member = %member_code, "member joined team");
    Ok(JoinOutcome::Joined(team))
}

/// Team registered under `team_code`, typed in any case.
pub fn get_team_by_code(gs: &Gameshow, team_code: &str) -> Option<Team> {
    gs.snapshot()
        .teams
        .get(&normalize_team_code(team_code))
        .cloned()
}

/// First team, in creation order, listing `member_code`.
pub fn get_team_by_member(gs: &Gameshow, member_code: &str) -> Option<Team> {
    gs.snapshot()
        .teams
        .values()
        .find(|team| team.has_member(member_code))
        .cloned()
}

/// Every team, in creation order.
pub fn get_all_teams(gs: &Gameshow) -> Vec<Team> {
    gs.snapshot().teams.values().cloned().collect()
}

/// Whether `guest_code` captains the team. Unknown teams have no captain.
pub fn is_team_captain(gs: &Gameshow, team_code: &str, guest_code: &str) -> bool {
    gs.snapshot()
        .teams
        .get(&normalize_team_code(team_code))
        .is_some_and(|team| team.is_captain(guest_code))
}

/// Hand captaincy to an existing member.
pub fn set_captain(
    gs: &mut Gameshow,
    team_code: &str,
    new_captain_code: &str,
) -> GameshowResult<Team> {
    let team_code = normalize_team_code(team_code);

    let team = gs.mutate(|snapshot| {
        let team = snapshot
            .teams
            .get_mut(&team_code)
            .ok_or_else(|| GameshowError::TeamNotFound(team_code.clone()))?;
        if !team.has_member(new_captain_code) {
            return Err(GameshowError::NotAMember {
                team_code: team_code.clone(),
                member_code: new_captain_code.to_owned(),
            });
        }
        team.captain_code = new_captain_code.to_owned();
        Ok(team.clone())
    })?;

    info!(team = %team_code, captain = %new_captain_code, "captain reassigned");
    Ok(team)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::state::test_support::gameshow;

    fn assert_captain_is_member(gs: &Gameshow) {
        for team in gs.snapshot().teams.values() {
            assert!(team.has_member(&team.captain_code), "{team:?}");
        }
    }

    #[test]
    fn generated_codes_are_distinct_and_well_formed() {
        let mut gs = gameshow();
        let mut seen = HashSet::new();
        for i in 0..200 {
            let team = create_team(&mut gs, &format!("Team {i}"), &format!("G{i}")).unwrap();
            assert_eq!(team.code.len(), TEAM_CODE_LENGTH);
            assert!(team.code.bytes().all(|b| TEAM_CODE_ALPHABET.contains(&b)));
            assert!(seen.insert(team.code));
        }
        assert_eq!(gs.snapshot().leaderboard.len(), 200);
    }

    #[test]
    fn generator_retries_on_collision() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = generate_team_code(&mut rng.clone(), |_| false);

        let code = generate_team_code(&mut rng, |candidate| candidate == first);
        assert_ne!(code, first);
        assert_eq!(code.len(), TEAM_CODE_LENGTH);
    }

    #[test]
    fn create_seeds_member_list_and_leaderboard() {
        let mut gs = gameshow();
        let team = create_team(&mut gs, "Red", "C1").unwrap();

        assert_eq!(team.members, vec!["C1".to_string()]);
        assert_eq!(team.captain_code, "C1");
        assert_eq!(team.score, 0);
        assert_eq!(
            gs.snapshot().leaderboard.get(&team.code),
            Some(&LeaderboardEntry::new("Red".into()))
        );
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut gs = gameshow();
        let err = create_team(&mut gs, " ", "C1").unwrap_err();
        assert!(matches!(err, GameshowError::InvalidInput(_)));
        assert!(get_all_teams(&gs).is_empty());
    }

    #[test]
    fn join_is_idempotent() {
        let mut gs = gameshow();
        let team = create_team(&mut gs, "Red", "C1").unwrap();

        let first = join_team(&mut gs, &team.code, "M2").unwrap();
        assert!(matches!(first, JoinOutcome::Joined(_)));
        let second = join_team(&mut gs, &team.code, "M2").unwrap();
        assert!(matches!(second, JoinOutcome::AlreadyMember(_)));

        assert_eq!(second.team().members, vec!["C1".to_string(), "M2".to_string()]);
        assert_captain_is_member(&gs);
    }

    #[test]
    fn join_accepts_lowercase_code() {
        let mut gs = gameshow();
        let team = create_team(&mut gs, "Red", "C1").unwrap();
        let outcome = join_team(&mut gs, &format!(" {} ", team.code.to_lowercase()), "M2").unwrap();
        assert_eq!(outcome.team().code, team.code);
    }

    #[test]
    fn join_unknown_team_fails() {
        let mut gs = gameshow();
        let err = join_team(&mut gs, "ZZZZZ", "M1").unwrap_err();
        assert!(matches!(err, GameshowError::TeamNotFound(code) if code == "ZZZZZ"));
    }

    #[test]
    fn lookups() {
        let mut gs = gameshow();
        let red = create_team(&mut gs, "Red", "C1").unwrap();
        let blue = create_team(&mut gs, "Blue", "C2").unwrap();
        join_team(&mut gs, &blue.code, "M3").unwrap();

        assert_eq!(get_team_by_code(&gs, &red.code).map(|t| t.name), Some("Red".into()));
        assert_eq!(get_team_by_member(&gs, "M3").map(|t| t.code), Some(blue.code.clone()));
        assert_eq!(get_team_by_member(&gs, "nobody"), None);
        assert!(is_team_captain(&gs, &red.code, "C1"));
        assert!(!is_team_captain(&gs, &blue.code, "M3"));
        assert!(!is_team_captain(&gs, "ZZZZZ", "C1"));
        assert_eq!(
            get_all_teams(&gs).into_iter().map(|t| t.name).collect::<Vec<_>>(),
            vec!["Red".to_string(), "Blue".to_string()]
        );
    }

    #[test]
    fn captain_can_only_move_to_a_member() {
        let mut gs = gameshow();
        let team = create_team(&mut gs, "Red", "C1").unwrap();

        let err = set_captain(&mut gs, &team.code, "OUTSIDER").unwrap_err();
        assert!(matches!(err, GameshowError::NotAMember { .. }));
        assert!(is_team_captain(&gs, &team.code, "C1"));

        join_team(&mut gs, &team.code, "M2").unwrap();
        let team = set_captain(&mut gs, &team.code, "M2").unwrap();
        assert_eq!(team.captain_code, "M2");
        assert_captain_is_member(&gs);

        assert!(matches!(
            set_captain(&mut gs, "ZZZZZ", "M2"),
            Err(GameshowError::TeamNotFound(_))
        ));
    }
}
