//! Rule tables for every supported game.
//!
//! Adjusting a game means editing its table; the scoring engine has no
//! per-game control flow.

use crate::rules::types::{
    ActionSpec, ExportColumn, Flow, PhaseKind, RuleTable, ScoreRule, SetBonus, SortKey,
    TemplateLayout, ToggleSpec,
};
use crate::rules::GameKind;

use ExportColumn::*;

pub static BOOM: RuleTable = RuleTable {
    game: GameKind::Boom,
    actions: &[
        ActionSpec::one_shot("1", 1),
        ActionSpec::one_shot("2a", 2),
        ActionSpec::one_shot("2b", 2),
        ActionSpec::one_shot("5", 5),
        ActionSpec::one_shot("10", 10),
        ActionSpec::one_shot("20", 20),
        ActionSpec::one_shot("25", 25),
        ActionSpec::one_shot("35", 35),
    ],
    toggles: &[ToggleSpec {
        id: "sweet_spot",
        points: 10,
    }],
    flow: Flow::Chain {
        initial: &["1"],
        unlocks: &[
            ("1", "2a"),
            ("2a", "2b"),
            ("2b", "5"),
            ("5", "10"),
            ("10", "20"),
            ("20", "25"),
            ("25", "35"),
        ],
    },
    score: ScoreRule::HighestReached,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 250,
    storage_key: "BoomData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(TimeRemaining)],
    template: TemplateLayout {
        file: "templates/Boom.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, BonusPoints), (5, TimeRemaining)],
    },
};

pub static FAR_OUT: RuleTable = RuleTable {
    game: GameKind::FarOut,
    actions: &[
        ActionSpec::miss("miss"),
        ActionSpec::repeatable("10", 10),
        ActionSpec::repeatable("20", 20),
        ActionSpec::repeatable("30", 30),
        ActionSpec::repeatable("40", 40),
        ActionSpec::repeatable("50", 50),
    ],
    toggles: &[ToggleSpec {
        id: "all_rollers",
        points: 10,
    }],
    flow: Flow::Open {
        press_limit: Some(5),
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 90,
    undo_depth: 50,
    storage_key: "FarOutData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(BestThrow)],
    template: TemplateLayout {
        file: "templates/FarOut.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, BestThrow), (5, Misses)],
    },
};

pub static FRIZGILITY: RuleTable = RuleTable {
    game: GameKind::Frizgility,
    actions: &[
        ActionSpec::phase("obstacle_a", 5, PhaseKind::Obstacle),
        ActionSpec::phase("obstacle_b", 5, PhaseKind::Obstacle),
        ActionSpec::phase("obstacle_c", 5, PhaseKind::Obstacle),
        ActionSpec::phase("obstacle_d", 5, PhaseKind::Obstacle),
        ActionSpec::phase("catch_short", 10, PhaseKind::Catch),
        ActionSpec::phase("catch_mid", 15, PhaseKind::Catch),
        ActionSpec::phase("catch_long", 20, PhaseKind::Catch),
        ActionSpec::phase("catch_bonus", 25, PhaseKind::Catch),
        ActionSpec::miss("miss"),
    ],
    toggles: &[],
    flow: Flow::Phased {
        quota: 3,
        miss_cap: 3,
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 90,
    undo_depth: 100,
    storage_key: "FrizgilityData.json",
    sort: &[SortKey::desc(Total), SortKey::asc(Misses)],
    template: TemplateLayout {
        file: "templates/Frizgility.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, Cycles), (5, Misses)],
    },
};

pub static FUN_KEY: RuleTable = RuleTable {
    game: GameKind::FunKey,
    actions: &[
        ActionSpec::one_shot("a1", 5),
        ActionSpec::one_shot("b1", 5),
        ActionSpec::one_shot("c1", 5),
        ActionSpec::one_shot("a2", 10),
        ActionSpec::one_shot("b2", 10),
        ActionSpec::one_shot("c2", 10),
        ActionSpec::one_shot("key", 25),
    ],
    toggles: &[],
    flow: Flow::Chain {
        initial: &["a1", "b1", "c1"],
        unlocks: &[
            ("a1", "a2"),
            ("b1", "b2"),
            ("c1", "c2"),
            ("a2", "key"),
            ("b2", "key"),
            ("c2", "key"),
        ],
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 50,
    storage_key: "FunKeyData.json",
    sort: &[SortKey::desc(Total)],
    template: TemplateLayout {
        file: "templates/FunKey.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total)],
    },
};

pub static GREEDY: RuleTable = RuleTable {
    game: GameKind::Greedy,
    actions: &[
        ActionSpec::miss("miss"),
        ActionSpec::repeatable("1", 1),
        ActionSpec::repeatable("3", 3),
        ActionSpec::repeatable("5", 5),
        ActionSpec::repeatable("greedy", 10),
    ],
    toggles: &[],
    flow: Flow::Open { press_limit: None },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 50,
    storage_key: "GreedyData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(BestThrow)],
    template: TemplateLayout {
        file: "templates/Greedy.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, BestThrow)],
    },
};

pub static SEVEN_UP: RuleTable = RuleTable {
    game: GameKind::SevenUp,
    actions: &[
        ActionSpec::one_shot("jump_1", 3),
        ActionSpec::one_shot("jump_2", 3),
        ActionSpec::one_shot("jump_3", 3),
        ActionSpec::one_shot("jump_4", 3),
        ActionSpec::one_shot("jump_5", 3),
        ActionSpec::one_shot("jump_6", 3),
        ActionSpec::one_shot("jump_7", 3),
        ActionSpec::capped("non_jump", 1, 7),
    ],
    toggles: &[],
    flow: Flow::Chain {
        initial: &[
            "jump_1", "jump_2", "jump_3", "jump_4", "jump_5", "jump_6", "jump_7",
        ],
        unlocks: &[],
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 250,
    storage_key: "SevenUpData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(TimeRemaining)],
    template: TemplateLayout {
        file: "templates/SevenUp.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, TimeRemaining)],
    },
};

pub static FIREBALL: RuleTable = RuleTable {
    game: GameKind::Fireball,
    actions: &[
        ActionSpec::cell("1", 1, 1, false),
        ActionSpec::cell("2", 2, 2, false),
        ActionSpec::cell("3", 3, 3, false),
        ActionSpec::cell("4", 4, 4, false),
        ActionSpec::cell("5", 5, 5, false),
        ActionSpec::cell("6", 6, 6, false),
        ActionSpec::cell("7", 7, 7, false),
        ActionSpec::cell("8", 8, 8, false),
        ActionSpec::cell("f1", 1, 2, true),
        ActionSpec::cell("f2", 2, 4, true),
        ActionSpec::cell("f3", 3, 6, true),
        ActionSpec::cell("f4", 4, 8, true),
        ActionSpec::cell("f5", 5, 10, true),
        ActionSpec::cell("f6", 6, 12, true),
        ActionSpec::cell("f7", 7, 14, true),
        ActionSpec::cell("f8", 8, 16, true),
    ],
    toggles: &[],
    flow: Flow::Board {
        zones: &[1, 2, 3, 4, 5, 6, 7, 8],
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 90,
    undo_depth: 100,
    storage_key: "FireballData.json",
    sort: &[
        SortKey::desc(Total),
        SortKey::desc(HighestZone),
        SortKey::desc(BonusPoints),
    ],
    template: TemplateLayout {
        file: "templates/Fireball.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, HighestZone), (5, BonusPoints), (6, Boards)],
    },
};

pub static FOUR_WAY_PLAY: RuleTable = RuleTable {
    game: GameKind::FourWayPlay,
    actions: &[
        ActionSpec::miss("miss"),
        ActionSpec::repeatable("north", 2),
        ActionSpec::repeatable("east", 3),
        ActionSpec::repeatable("south", 4),
        ActionSpec::repeatable("west", 5),
    ],
    toggles: &[],
    flow: Flow::Open { press_limit: None },
    score: ScoreRule::Sum,
    set_bonus: Some(SetBonus {
        actions: &["north", "east", "south", "west"],
        points: 10,
    }),
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 50,
    storage_key: "FourWayPlayData.json",
    sort: &[SortKey::desc(Total)],
    template: TemplateLayout {
        file: "templates/FourWayPlay.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, BonusPoints)],
    },
};

pub static THROW_N_GO: RuleTable = RuleTable {
    game: GameKind::ThrowNGo,
    actions: &[
        ActionSpec::miss("miss"),
        ActionSpec::repeatable("short", 1),
        ActionSpec::repeatable("mid", 3),
        ActionSpec::repeatable("long", 5),
        ActionSpec::repeatable("go", 2),
    ],
    toggles: &[ToggleSpec {
        id: "all_rollers",
        points: 5,
    }],
    flow: Flow::Open { press_limit: None },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 50,
    storage_key: "ThrowNGoData.json",
    sort: &[SortKey::desc(Total)],
    template: TemplateLayout {
        file: "templates/ThrowNGo.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total)],
    },
};

pub static TIME_WARP: RuleTable = RuleTable {
    game: GameKind::TimeWarp,
    actions: &[
        ActionSpec::one_shot("z1", 5),
        ActionSpec::one_shot("z2", 10),
        ActionSpec::one_shot("z3", 15),
    ],
    toggles: &[],
    flow: Flow::Chain {
        initial: &["z1"],
        unlocks: &[("z1", "z2"), ("z2", "z3")],
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: true,
    round_seconds: 60,
    undo_depth: 250,
    storage_key: "TimeWarpData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(TimeRemaining)],
    template: TemplateLayout {
        file: "templates/TimeWarp.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, TimeRemaining)],
    },
};

pub static SPACED_OUT: RuleTable = RuleTable {
    game: GameKind::SpacedOut,
    actions: &[
        ActionSpec::miss("miss"),
        ActionSpec::repeatable("5", 5),
        ActionSpec::repeatable("10", 10),
        ActionSpec::repeatable("15", 15),
        ActionSpec::repeatable("20", 20),
    ],
    toggles: &[ToggleSpec {
        id: "sweet_spot",
        points: 5,
    }],
    flow: Flow::Open {
        press_limit: Some(6),
    },
    score: ScoreRule::Sum,
    set_bonus: None,
    time_bonus: false,
    round_seconds: 60,
    undo_depth: 50,
    storage_key: "SpacedOutData.json",
    sort: &[SortKey::desc(Total), SortKey::desc(BestThrow)],
    template: TemplateLayout {
        file: "templates/SpacedOut.xlsx",
        start_row: 5,
        handler_col: 1,
        dog_col: 2,
        columns: &[(3, Total), (4, BestThrow)],
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::ActionKind;

    #[test]
    fn test_action_ids_unique() {
        for game in GameKind::all() {
            let rules = game.rules();
            let mut ids: Vec<&str> = rules.actions.iter().map(|a| a.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), rules.actions.len(), "{game}");
        }
    }

    #[test]
    fn test_chain_tables_reference_known_actions() {
        for game in GameKind::all() {
            let rules = game.rules();
            if let Flow::Chain { initial, unlocks } = rules.flow {
                for id in initial {
                    assert!(rules.action(id).is_some(), "{game}: {id}");
                }
                for (from, to) in unlocks {
                    assert_eq!(rules.action(from).unwrap().kind, ActionKind::OneShot);
                    assert_eq!(rules.action(to).unwrap().kind, ActionKind::OneShot);
                }
            }
        }
    }

    #[test]
    fn test_boom_chain_order() {
        let mut order = vec!["1"];
        while let Some(next) = BOOM.successor(order[order.len() - 1]) {
            order.push(next);
        }
        assert_eq!(order, ["1", "2a", "2b", "5", "10", "20", "25", "35"]);
    }

    #[test]
    fn test_fireball_zones_have_both_marks() {
        if let Flow::Board { zones } = FIREBALL.flow {
            for zone in zones {
                assert_eq!(FIREBALL.zone_actions(*zone).len(), 2);
            }
        } else {
            panic!("fireball must be a board game");
        }
    }

    #[test]
    fn test_undo_depth_within_bounds() {
        for game in GameKind::all() {
            let depth = game.rules().undo_depth;
            assert!((50..=250).contains(&depth), "{game}");
        }
    }
}
