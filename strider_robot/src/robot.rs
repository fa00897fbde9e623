//! The robot: scheduler, container and mode machine driven tick by tick.
//!
//! Mode changes apply their scheduler side effects immediately:
//!
//! - **Autonomous**: enable the scheduler, schedule a freshly selected
//!   routine.
//! - **Teleop**: enable the scheduler, cancel the routine if still running.
//! - **Disabled / EStop**: cancel everything and suspend default backfill.
//!
//! A match advances by itself: autonomous hands over to teleop after
//! `match.autonomous_secs`, and teleop disables after `match.teleop_secs`.

use std::sync::Arc;

use strider_command::{CommandId, Scheduler, TickTimer};
use strider_common::io::dashboard::Dashboard;
use tracing::{info, warn};

use crate::config::RobotConfig;
use crate::container::{Hardware, RobotContainer};
use crate::error::RobotError;
use crate::mode::{ModeEvent, ModeStateMachine, RobotMode, TransitionResult};

/// Dashboard key holding the current mode.
pub const MODE_KEY: &str = "Mode";

/// Phase lengths in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPlan {
    pub autonomous_ticks: u64,
    pub teleop_ticks: u64,
}

impl MatchPlan {
    pub fn from_config(config: &RobotConfig) -> Self {
        let period = config.period();
        let ticks = |secs| TickTimer::from_duration(std::time::Duration::from_secs(secs), period).limit();
        Self {
            autonomous_ticks: ticks(config.match_timing.autonomous_secs),
            teleop_ticks: ticks(config.match_timing.teleop_secs),
        }
    }

    pub fn total_ticks(&self) -> u64 {
        self.autonomous_ticks.saturating_add(self.teleop_ticks)
    }
}

pub struct Robot {
    scheduler: Scheduler,
    container: RobotContainer,
    mode: ModeStateMachine,
    plan: MatchPlan,
    /// Ticks spent in the current mode.
    mode_ticks: u64,
    autonomous: Option<CommandId>,
    started: bool,
}

impl Robot {
    /// Build the robot disabled.
    pub fn new(config: &RobotConfig, hardware: Hardware, dashboard: Arc<dyn Dashboard>) -> Result<Self, RobotError> {
        let mut scheduler = Scheduler::new();
        scheduler.set_enabled(false);
        let container = RobotContainer::new(config, hardware, dashboard, &mut scheduler)?;
        container.dashboard().put_string(MODE_KEY, RobotMode::Disabled.as_str());

        Ok(Self {
            scheduler,
            container,
            mode: ModeStateMachine::new(),
            plan: MatchPlan::from_config(config),
            mode_ticks: 0,
            autonomous: None,
            started: false,
        })
    }

    /// Start a full match in autonomous.
    pub fn start_match(&mut self) -> Result<TransitionResult, RobotError> {
        self.handle_event(ModeEvent::EnableAutonomous)
    }

    /// Start teleop directly (practice).
    pub fn start_teleop(&mut self) -> Result<TransitionResult, RobotError> {
        self.handle_event(ModeEvent::EnableTeleop)
    }

    /// Apply a mode event. A rejected transition is logged and returned,
    /// not treated as an error.
    pub fn handle_event(&mut self, event: ModeEvent) -> Result<TransitionResult, RobotError> {
        let result = self.mode.handle_event(event);
        match &result {
            TransitionResult::Ok(mode) => self.enter(*mode)?,
            TransitionResult::Rejected(reason) => {
                warn!(?event, mode = %self.mode.mode(), reason, "mode transition rejected");
            }
        }
        Ok(result)
    }

    fn enter(&mut self, mode: RobotMode) -> Result<(), RobotError> {
        info!(%mode, tick = self.scheduler.tick_count(), "mode changed");
        self.mode_ticks = 0;
        self.container.dashboard().put_string(MODE_KEY, mode.as_str());

        match mode {
            RobotMode::Autonomous => {
                self.started = true;
                self.scheduler.set_enabled(true);
                let routine = self.container.autonomous_command()?;
                let (id, _) = self.scheduler.schedule(routine)?;
                self.autonomous = Some(id);
            }
            RobotMode::Teleop => {
                self.started = true;
                self.scheduler.set_enabled(true);
                if let Some(id) = self.autonomous.take() {
                    if self.scheduler.cancel(id) {
                        info!("autonomous routine cancelled at teleop start");
                    }
                }
            }
            RobotMode::Disabled | RobotMode::EStop => {
                self.autonomous = None;
                self.scheduler.set_enabled(false);
            }
        }
        Ok(())
    }

    /// Run one scheduler tick, then advance the match clock.
    pub fn tick(&mut self) -> Result<(), RobotError> {
        self.scheduler.run();
        self.mode_ticks += 1;

        match self.mode.mode() {
            RobotMode::Autonomous if self.mode_ticks >= self.plan.autonomous_ticks => {
                self.handle_event(ModeEvent::EnableTeleop)?;
            }
            RobotMode::Teleop if self.mode_ticks >= self.plan.teleop_ticks => {
                self.handle_event(ModeEvent::Disable)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// True once a started match has ended (disabled or e-stopped).
    pub fn match_over(&self) -> bool {
        self.started && !self.mode.mode().is_enabled()
    }

    #[inline]
    pub fn mode(&self) -> RobotMode {
        self.mode.mode()
    }

    pub fn plan(&self) -> MatchPlan {
        self.plan
    }

    /// Id of the autonomous routine while it is scheduled.
    pub fn autonomous_command(&self) -> Option<CommandId> {
        self.autonomous.filter(|id| self.scheduler.is_scheduled(*id))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn container(&self) -> &RobotContainer {
        &self.container
    }
}
