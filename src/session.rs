//! 会话控制器
//!
//! 持有全部可变状态，所有阶段切换和计分规则都在这里

use tracing::{debug, info, instrument};

use crate::error::SessionError;
use crate::models::{DEFAULT_PLAYERS, MAX_PLAYERS, MIN_PLAYERS, Phase, Player, PlayerColor, PlayerId};

/// 一局游戏的会话状态
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    phase: Phase,
    player_count: usize,
    default_player_count: usize,
    name_drafts: Vec<String>,
    players: Vec<Player>,
}

impl Session {
    /// 创建会话，默认人数会被限制在 [1, 8]
    pub fn new(default_player_count: usize) -> Self {
        let default_player_count = default_player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self {
            phase: Phase::SettingPlayerCount,
            player_count: default_player_count,
            default_player_count,
            name_drafts: Vec::new(),
            players: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn name_drafts(&self) -> &[String] {
        &self.name_drafts
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// 按 ID 线性查找玩家
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn require_phase(&self, expected: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhaseOperation {
                operation,
                phase: self.phase,
            })
        }
    }

    // ============ 设置人数 ============

    /// 设置玩家人数，超出范围时保持原值
    #[instrument(skip(self))]
    pub fn set_player_count(&mut self, n: usize) -> Result<(), SessionError> {
        self.require_phase(Phase::SettingPlayerCount, "set_player_count")?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(SessionError::OutOfRangeCount { requested: n });
        }
        self.player_count = n;
        Ok(())
    }

    pub fn increment_player_count(&mut self) -> Result<(), SessionError> {
        self.set_player_count(self.player_count + 1)
    }

    pub fn decrement_player_count(&mut self) -> Result<(), SessionError> {
        // 0 同样会被范围检查拒绝
        self.set_player_count(self.player_count.saturating_sub(1))
    }

    /// 进入命名阶段，草稿重置为 N 个空字符串
    #[instrument(skip(self))]
    pub fn proceed_to_naming(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::SettingPlayerCount, "proceed_to_naming")?;
        self.name_drafts = vec![String::new(); self.player_count];
        self.phase = Phase::EnteringNames;
        info!(player_count = self.player_count, "Entering names");
        Ok(())
    }

    // ============ 命名 ============

    /// 修改某个位置的名字草稿（不做修剪和校验）
    pub fn update_name_draft(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.require_phase(Phase::EnteringNames, "update_name_draft")?;
        let len = self.name_drafts.len();
        let draft = self
            .name_drafts
            .get_mut(index)
            .ok_or(SessionError::DraftOutOfBounds { index, len })?;
        *draft = text.into();
        Ok(())
    }

    /// 所有草稿去掉首尾空白后都非空
    pub fn all_names_entered(&self) -> bool {
        self.name_drafts.iter().all(|name| !name.trim().is_empty())
    }

    /// 按草稿顺序创建玩家并开始游戏
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::EnteringNames, "start_game")?;
        if !self.all_names_entered() {
            return Err(SessionError::NamesIncomplete);
        }
        self.players = self
            .name_drafts
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(name.clone(), PlayerColor::for_index(index)))
            .collect();
        self.phase = Phase::Playing;
        info!(players = self.players.len(), "Game started");
        Ok(())
    }

    // ============ 计分 ============

    /// 加一分，找不到玩家时什么也不做
    #[instrument(skip(self))]
    pub fn increment_score(&mut self, id: PlayerId) -> Result<(), SessionError> {
        self.require_phase(Phase::Playing, "increment_score")?;
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.score = player.score.saturating_add(1);
                debug!(name = %player.name, score = player.score, "Score incremented");
            }
            None => debug!("Unknown player, ignoring increment"),
        }
        Ok(())
    }

    /// 减一分，分数为 0 或找不到玩家时什么也不做
    #[instrument(skip(self))]
    pub fn decrement_score(&mut self, id: PlayerId) -> Result<(), SessionError> {
        self.require_phase(Phase::Playing, "decrement_score")?;
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            if player.score > 0 {
                player.score -= 1;
                debug!(name = %player.name, score = player.score, "Score decremented");
            }
        }
        Ok(())
    }

    /// 所有分数清零，玩家和阶段不变
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Playing, "reset_scores")?;
        for player in &mut self.players {
            player.score = 0;
        }
        info!("Scores reset");
        Ok(())
    }

    /// 新游戏：回到人数设置，任何阶段都可调用
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) {
        self.players.clear();
        self.name_drafts.clear();
        self.player_count = self.default_player_count;
        self.phase = Phase::SettingPlayerCount;
        info!("Session reset");
    }

    /// 当前领先者（最高分且大于 0，可能并列）
    pub fn leaders(&self) -> Vec<PlayerId> {
        let top = self.players.iter().map(|p| p.score).max().unwrap_or(0);
        if top == 0 {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|p| p.score == top)
            .map(|p| p.id)
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing(names: &[&str]) -> Session {
        let mut session = Session::default();
        session.set_player_count(names.len()).unwrap();
        session.proceed_to_naming().unwrap();
        for (i, name) in names.iter().enumerate() {
            session.update_name_draft(i, *name).unwrap();
        }
        session.start_game().unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::SettingPlayerCount);
        assert_eq!(session.player_count(), 2);
        assert!(session.name_drafts().is_empty());
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_new_clamps_default() {
        assert_eq!(Session::new(0).player_count(), 1);
        assert_eq!(Session::new(12).player_count(), 8);
    }

    #[test]
    fn test_proceed_creates_empty_drafts() {
        for n in MIN_PLAYERS..=MAX_PLAYERS {
            let mut session = Session::default();
            session.set_player_count(n).unwrap();
            session.proceed_to_naming().unwrap();
            assert_eq!(session.phase(), Phase::EnteringNames);
            assert_eq!(session.name_drafts().len(), n);
            assert!(session.name_drafts().iter().all(String::is_empty));
        }
    }

    #[test]
    fn test_count_out_of_range_unchanged() {
        let mut session = Session::default();
        session.set_player_count(1).unwrap();
        assert_eq!(
            session.decrement_player_count(),
            Err(SessionError::OutOfRangeCount { requested: 0 })
        );
        assert_eq!(session.player_count(), 1);

        session.set_player_count(8).unwrap();
        assert!(session.increment_player_count().is_err());
        assert!(session.set_player_count(9).is_err());
        assert_eq!(session.player_count(), 8);
    }

    #[test]
    fn test_set_count_outside_setup_rejected() {
        let mut session = playing(&["Alice", "Bob"]);
        assert!(matches!(
            session.set_player_count(3),
            Err(SessionError::InvalidPhaseOperation { .. })
        ));
        assert_eq!(session.player_count(), 2);
    }

    #[test]
    fn test_update_draft_bounds() {
        let mut session = Session::default();
        assert!(session.update_name_draft(0, "x").is_err());
        session.proceed_to_naming().unwrap();
        assert_eq!(
            session.update_name_draft(2, "x"),
            Err(SessionError::DraftOutOfBounds { index: 2, len: 2 })
        );
        session.update_name_draft(1, "  Bo ").unwrap();
        assert_eq!(session.name_drafts()[1], "  Bo ");
    }

    #[test]
    fn test_all_names_entered() {
        let mut session = Session::default();
        session.proceed_to_naming().unwrap();
        assert!(!session.all_names_entered());

        session.update_name_draft(0, "Alice").unwrap();
        session.update_name_draft(1, "  ").unwrap();
        assert!(!session.all_names_entered());

        session.update_name_draft(1, "Bo").unwrap();
        assert!(session.all_names_entered());
    }

    #[test]
    fn test_start_game_requires_names() {
        let mut session = Session::default();
        session.proceed_to_naming().unwrap();
        session.update_name_draft(0, "Alice").unwrap();
        assert_eq!(session.start_game(), Err(SessionError::NamesIncomplete));
        assert_eq!(session.phase(), Phase::EnteringNames);
        assert!(session.players().is_empty());
    }

    #[test]
    fn test_start_game_creates_players() {
        let session = playing(&["Alice", "Bob", " Cara "]);
        let players = session.players();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(players.len(), 3);
        assert_ne!(players[0].id, players[1].id);
        assert_ne!(players[1].id, players[2].id);
        assert_ne!(players[0].id, players[2].id);
        assert!(players.iter().all(|p| p.score == 0));
        assert_eq!(players[0].color, PlayerColor::PALETTE[0]);
        assert_eq!(players[1].color, PlayerColor::PALETTE[1]);
        assert_eq!(players[2].color, PlayerColor::PALETTE[2]);
        assert_eq!(players[2].name, " Cara ");
    }

    #[test]
    fn test_eight_players_distinct_colors() {
        let session = playing(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let players = session.players();
        for (i, a) in players.iter().enumerate() {
            for b in &players[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }

    #[test]
    fn test_score_never_negative() {
        let mut session = playing(&["Alice", "Bob"]);
        let id = session.players()[0].id;

        session.decrement_score(id).unwrap();
        assert_eq!(session.player(id).unwrap().score, 0);

        // +1 +1 -1 -1 -1 +1 => 1
        session.increment_score(id).unwrap();
        session.increment_score(id).unwrap();
        session.decrement_score(id).unwrap();
        session.decrement_score(id).unwrap();
        session.decrement_score(id).unwrap();
        session.increment_score(id).unwrap();
        assert_eq!(session.player(id).unwrap().score, 1);
        assert_eq!(session.players()[1].score, 0);
    }

    proptest! {
        // true = +1, false = -1；参考计数器只在分数大于 0 时扣分
        #[test]
        fn test_score_matches_reference(ops in prop::collection::vec(any::<bool>(), 0..200)) {
            let mut session = playing(&["Alice", "Bob"]);
            let id = session.players()[0].id;
            let mut expected: u32 = 0;
            for increment in ops {
                if increment {
                    session.increment_score(id).unwrap();
                    expected += 1;
                } else {
                    session.decrement_score(id).unwrap();
                    if expected > 0 {
                        expected -= 1;
                    }
                }
                prop_assert_eq!(session.player(id).unwrap().score, expected);
            }
            prop_assert_eq!(session.players()[1].score, 0);
        }
    }

    fn assert_rejected_unchanged(session: &mut Session, op: fn(&mut Session) -> Result<(), SessionError>) {
        let before = session.clone();
        assert!(matches!(
            op(session),
            Err(SessionError::InvalidPhaseOperation { .. })
        ));
        assert_eq!(*session, before);
    }

    #[test]
    fn test_proceed_to_naming_only_from_setup() {
        let mut naming = Session::default();
        naming.proceed_to_naming().unwrap();
        naming.update_name_draft(0, "Alice").unwrap();
        assert_rejected_unchanged(&mut naming, Session::proceed_to_naming);
        assert_eq!(naming.name_drafts()[0], "Alice");

        let mut game = playing(&["Alice", "Bob", "Cara"]);
        assert_rejected_unchanged(&mut game, Session::proceed_to_naming);
        assert_eq!(game.players().len(), 3);
    }

    #[test]
    fn test_start_game_only_from_naming() {
        let mut setup = Session::default();
        assert_rejected_unchanged(&mut setup, Session::start_game);
        assert!(setup.players().is_empty());

        let mut game = playing(&["Alice", "Bob"]);
        let id = game.players()[0].id;
        game.increment_score(id).unwrap();
        assert_rejected_unchanged(&mut game, Session::start_game);
        assert_eq!(game.player(id).unwrap().score, 1);
    }

    #[test]
    fn test_unknown_player_is_noop() {
        let mut session = playing(&["Alice"]);
        let before = session.clone();
        session.increment_score(uuid::Uuid::new_v4()).unwrap();
        session.decrement_score(uuid::Uuid::new_v4()).unwrap();
        assert_eq!(session, before);
    }

    #[test]
    fn test_scoring_outside_playing_rejected() {
        let mut session = Session::default();
        let id = uuid::Uuid::new_v4();
        assert!(session.increment_score(id).is_err());
        assert!(session.decrement_score(id).is_err());
        assert!(session.reset_scores().is_err());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_reset_scores_keeps_players() {
        let mut session = playing(&["Alice", "Bob"]);
        let ids: Vec<_> = session.players().iter().map(|p| p.id).collect();
        session.increment_score(ids[0]).unwrap();
        session.increment_score(ids[1]).unwrap();
        session.increment_score(ids[1]).unwrap();
        let before = session.players().to_vec();

        session.reset_scores().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        for (after, before) in session.players().iter().zip(&before) {
            assert_eq!(after.score, 0);
            assert_eq!(after.id, before.id);
            assert_eq!(after.name, before.name);
            assert_eq!(after.color, before.color);
        }
    }

    #[test]
    fn test_reset_all() {
        let mut session = playing(&["Alice", "Bob", "Cara"]);
        session.reset_all();
        assert_eq!(session.phase(), Phase::SettingPlayerCount);
        assert!(session.players().is_empty());
        assert!(session.name_drafts().is_empty());
        assert_eq!(session.player_count(), 2);

        let once = session.clone();
        session.reset_all();
        assert_eq!(session, once);
    }

    #[test]
    fn test_reset_all_from_naming() {
        let mut session = Session::new(4);
        session.set_player_count(6).unwrap();
        session.proceed_to_naming().unwrap();
        session.reset_all();
        assert_eq!(session.phase(), Phase::SettingPlayerCount);
        assert_eq!(session.player_count(), 4);
    }

    #[test]
    fn test_new_game_recomputes_colors() {
        let mut session = playing(&["Alice", "Bob"]);
        let first_ids: Vec<_> = session.players().iter().map(|p| p.id).collect();
        session.reset_all();
        session.proceed_to_naming().unwrap();
        session.update_name_draft(0, "Cara").unwrap();
        session.update_name_draft(1, "Dan").unwrap();
        session.start_game().unwrap();
        assert_eq!(session.players()[0].color, PlayerColor::Red);
        assert_eq!(session.players()[1].color, PlayerColor::Blue);
        assert!(session.players().iter().all(|p| !first_ids.contains(&p.id)));
    }

    #[test]
    fn test_leaders() {
        let mut session = playing(&["Alice", "Bob", "Cara"]);
        assert!(session.leaders().is_empty());
        let ids: Vec<_> = session.players().iter().map(|p| p.id).collect();
        session.increment_score(ids[1]).unwrap();
        assert_eq!(session.leaders(), vec![ids[1]]);
        session.increment_score(ids[2]).unwrap();
        assert_eq!(session.leaders(), vec![ids[1], ids[2]]);
    }
}
