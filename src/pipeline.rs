//! Feature pipeline
//!
//! Wires the feature stages together in dependency order over in-memory
//! tables. Each stage owns its output; nothing is mutated after it is
//! produced, so re-running on identical inputs yields identical output.

use serde::{Deserialize, Serialize};

use crate::data::preprocess;
use crate::data::providers::{ScheduleProvider, WeeklyStatsProvider};
use crate::features::player_form::compute_player_form;
use crate::features::team_scoring::team_weekly_scoring;
use crate::features::vegas::vegas_features;
use crate::features::{
    DefenseVsPosition, HomeAwayIndex, PlayerForm, ScoringRules, TeamWeekScore, VegasRow,
};
use crate::{Config, GameRecord, PlayerId, PlayerWeekRecord, Position, Result, TeamCode};

/// Terminal engineered row for one player-week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeatureRow {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub position: Position,
    pub team: TeamCode,
    pub opponent: TeamCode,
    pub season: u16,
    pub week: u8,
    /// Fantasy score for this week
    pub fantasy_points: f64,
    pub form: PlayerForm,
    /// Opponent's allowed-average against this position
    pub defense_vs_pos: Option<f64>,
    pub home: bool,
}

/// Output tables of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredFeatures {
    pub players: Vec<PlayerFeatureRow>,
    pub team_scoring: Vec<TeamWeekScore>,
    pub vegas: Vec<VegasRow>,
}

/// Runs all feature stages over weekly stats and schedule tables
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    scoring: ScoringRules,
}

impl FeaturePipeline {
    pub fn new(scoring: ScoringRules) -> Self {
        FeaturePipeline { scoring }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scoring)
    }

    /// Fetch raw rows through the provider seams, preprocess them and run
    /// the pipeline
    pub fn run_with_providers(
        &self,
        weekly_provider: &dyn WeeklyStatsProvider,
        schedule_provider: &dyn ScheduleProvider,
        seasons: &[u16],
    ) -> Result<EngineeredFeatures> {
        let weekly = preprocess::prepare_weekly(weekly_provider.fetch_weekly(seasons)?);
        let schedule = preprocess::prepare_schedule(schedule_provider.fetch_schedule(seasons)?);
        Ok(self.run(weekly, schedule))
    }

    /// Run every stage over already-typed records
    pub fn run(
        &self,
        mut weekly: Vec<PlayerWeekRecord>,
        mut schedule: Vec<GameRecord>,
    ) -> EngineeredFeatures {
        // Chronological order once, up front; the sort is stable so ties
        // keep provider order and re-runs stay deterministic
        weekly.sort_by_key(|r| (r.season, r.week));
        schedule.sort_by_key(|g| (g.season, g.week));

        let scores: Vec<f64> = weekly
            .iter()
            .map(|r| self.scoring.fantasy_points(&r.stats))
            .collect();
        log::info!("Scored {} player-weeks", scores.len());

        let form = compute_player_form(&weekly, &scores);
        let dvp = DefenseVsPosition::from_scored_rows(&weekly, &scores);
        let home_index = HomeAwayIndex::from_schedule(&schedule);
        log::info!("Computed {} defense-vs-position matchup averages", dvp.len());

        let players: Vec<PlayerFeatureRow> = weekly
            .into_iter()
            .zip(scores)
            .zip(form)
            .map(|((record, fantasy_points), form)| {
                let defense_vs_pos =
                    dvp.allowed_avg(record.season, record.week, &record.opponent, record.position);
                let home = home_index.is_home(record.season, record.week, &record.team);
                PlayerFeatureRow {
                    player_id: record.player_id,
                    player_name: record.player_name,
                    position: record.position,
                    team: record.team,
                    opponent: record.opponent,
                    season: record.season,
                    week: record.week,
                    fantasy_points,
                    form,
                    defense_vs_pos,
                    home,
                }
            })
            .collect();

        let team_scoring = team_weekly_scoring(&schedule);
        let vegas = vegas_features(&schedule, &team_scoring);
        log::info!(
            "Engineered {} player rows, {} team-week rows, {} vegas rows",
            players.len(),
            team_scoring.len(),
            vegas.len()
        );

        EngineeredFeatures {
            players,
            team_scoring,
            vegas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::providers::{ScheduleRow, WeeklyStatRow};
    use crate::{FantasyError, StatLine};

    fn make_week(
        player: &str,
        position: Position,
        team: &str,
        opponent: &str,
        week: u8,
        stats: StatLine,
    ) -> PlayerWeekRecord {
        PlayerWeekRecord {
            player_id: PlayerId(player.to_string()),
            player_name: Some(player.to_string()),
            position,
            team: TeamCode::new(team),
            opponent: TeamCode::new(opponent),
            season: 2023,
            week,
            stats,
        }
    }

    fn make_game(
        week: u8,
        home: &str,
        away: &str,
        home_score: u32,
        away_score: u32,
    ) -> GameRecord {
        GameRecord {
            season: 2023,
            week,
            gameday: None,
            home_team: TeamCode::new(home),
            away_team: TeamCode::new(away),
            home_score,
            away_score,
            total_line: Some(45.0),
            spread_line: Some(3.0),
        }
    }

    fn passing(yards: f64, tds: f64) -> StatLine {
        StatLine {
            passing_yards: yards,
            passing_tds: tds,
            ..StatLine::default()
        }
    }

    fn fixture() -> (Vec<PlayerWeekRecord>, Vec<GameRecord>) {
        let weekly = vec![
            make_week("qb-kc", Position::Quarterback, "KC", "DEN", 1, passing(250.0, 2.0)),
            make_week("qb-den", Position::Quarterback, "DEN", "KC", 1, passing(180.0, 1.0)),
            make_week("qb-kc", Position::Quarterback, "KC", "DEN", 2, passing(310.0, 3.0)),
            make_week("qb-den", Position::Quarterback, "DEN", "KC", 2, passing(210.0, 0.0)),
        ];
        let schedule = vec![
            make_game(1, "KC", "DEN", 24, 10),
            make_game(2, "DEN", "KC", 13, 27),
        ];
        (weekly, schedule)
    }

    #[test]
    fn test_full_run_assembles_all_tables() {
        let (weekly, schedule) = fixture();
        let features = FeaturePipeline::default().run(weekly, schedule);

        assert_eq!(features.players.len(), 4);
        assert_eq!(features.team_scoring.len(), 4);
        assert_eq!(features.vegas.len(), 2);
    }

    #[test]
    fn test_home_flags_follow_schedule() {
        let (weekly, schedule) = fixture();
        let features = FeaturePipeline::default().run(weekly, schedule);

        let kc_week1 = features
            .players
            .iter()
            .find(|p| p.player_id == PlayerId("qb-kc".to_string()) && p.week == 1)
            .unwrap();
        let kc_week2 = features
            .players
            .iter()
            .find(|p| p.player_id == PlayerId("qb-kc".to_string()) && p.week == 2)
            .unwrap();
        assert!(kc_week1.home);
        assert!(!kc_week2.home);
    }

    #[test]
    fn test_defense_context_joined_by_opponent() {
        let (weekly, schedule) = fixture();
        let features = FeaturePipeline::default().run(weekly, schedule);

        // 250 yds + 2 TD = 18.0; DEN allowed that to QBs in week 1
        let kc_week1 = features
            .players
            .iter()
            .find(|p| p.player_id == PlayerId("qb-kc".to_string()) && p.week == 1)
            .unwrap();
        assert_eq!(kc_week1.fantasy_points, 18.0);
        assert_eq!(kc_week1.defense_vs_pos, Some(18.0));

        // Week 2: 310 yds + 3 TD + 300-yard bonus = 27.4; expanding mean
        // includes the current week: (18.0 + 27.4) / 2
        let kc_week2 = features
            .players
            .iter()
            .find(|p| p.player_id == PlayerId("qb-kc".to_string()) && p.week == 2)
            .unwrap();
        assert_eq!(kc_week2.fantasy_points, 27.4);
        assert_eq!(kc_week2.defense_vs_pos, Some(22.7));
    }

    #[test]
    fn test_form_windows_exclude_current_week() {
        let (weekly, schedule) = fixture();
        let features = FeaturePipeline::default().run(weekly, schedule);

        let kc_week2 = features
            .players
            .iter()
            .find(|p| p.player_id == PlayerId("qb-kc".to_string()) && p.week == 2)
            .unwrap();
        assert!(!kc_week2.form.is_rookie);
        assert_eq!(kc_week2.form.last1, 18.0);
    }

    #[test]
    fn test_rows_sorted_chronologically() {
        let (mut weekly, schedule) = fixture();
        weekly.reverse();
        let features = FeaturePipeline::default().run(weekly, schedule);

        let weeks: Vec<u8> = features.players.iter().map(|p| p.week).collect();
        assert_eq!(weeks, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_pipeline_honors_configured_scoring() {
        let mut config = Config::default();
        config.scoring.reception = 0.5;

        let (mut weekly, schedule) = fixture();
        weekly[0].stats.receptions = 2.0;

        let features = FeaturePipeline::from_config(&config).run(weekly, schedule);
        // 250 yds + 2 TD = 18.0, plus 2 half-point receptions
        assert_eq!(features.players[0].fantasy_points, 19.0);
    }

    #[test]
    fn test_rerun_is_identical() {
        let (weekly, schedule) = fixture();
        let pipeline = FeaturePipeline::default();

        let first = pipeline.run(weekly.clone(), schedule.clone());
        let second = pipeline.run(weekly, schedule);

        assert_eq!(first, second);
    }

    struct FixtureProviders {
        weekly: Vec<WeeklyStatRow>,
        schedule: Vec<ScheduleRow>,
        fail: bool,
    }

    impl WeeklyStatsProvider for FixtureProviders {
        fn fetch_weekly(&self, _seasons: &[u16]) -> crate::Result<Vec<WeeklyStatRow>> {
            if self.fail {
                return Err(FantasyError::Provider {
                    provider: "fixture".to_string(),
                    message: "unavailable".to_string(),
                });
            }
            Ok(self.weekly.clone())
        }
    }

    impl ScheduleProvider for FixtureProviders {
        fn fetch_schedule(&self, _seasons: &[u16]) -> crate::Result<Vec<ScheduleRow>> {
            Ok(self.schedule.clone())
        }
    }

    fn raw_week(player: &str, season_type: &str, position: &str) -> WeeklyStatRow {
        WeeklyStatRow {
            player_id: player.to_string(),
            player_name: None,
            season: 2023,
            week: 1,
            season_type: season_type.to_string(),
            position: position.to_string(),
            recent_team: "KC".to_string(),
            opponent_team: "DEN".to_string(),
            stats: passing(200.0, 1.0),
        }
    }

    #[test]
    fn test_run_with_providers_preprocesses_raw_rows() {
        let providers = FixtureProviders {
            weekly: vec![
                raw_week("qb-kc", "REG", "QB"),
                raw_week("qb-post", "POST", "QB"),
                raw_week("kicker", "REG", "K"),
            ],
            schedule: vec![ScheduleRow {
                season: 2023,
                week: 1,
                game_type: "REG".to_string(),
                gameday: None,
                home_team: "KC".to_string(),
                away_team: "DEN".to_string(),
                home_score: 24,
                away_score: 10,
                total_line: Some(45.0),
                spread_line: Some(3.0),
            }],
            fail: false,
        };

        let features = FeaturePipeline::default()
            .run_with_providers(&providers, &providers, &[2023])
            .unwrap();

        // Postseason and kicker rows are filtered out
        assert_eq!(features.players.len(), 1);
        assert!(features.players[0].home);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let providers = FixtureProviders {
            weekly: Vec::new(),
            schedule: Vec::new(),
            fail: true,
        };

        let result = FeaturePipeline::default().run_with_providers(&providers, &providers, &[2023]);
        assert!(matches!(result, Err(FantasyError::Provider { .. })));
    }
}
