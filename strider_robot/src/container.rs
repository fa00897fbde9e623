//! Robot wiring.
//!
//! [`RobotContainer`] is the one place that declares the robot's
//! structure: it registers the six subsystems with the scheduler, binds
//! each one's teleop default command to the configured controller inputs,
//! and owns the autonomous [`RoutineSelector`].

use std::sync::Arc;

use strider_command::{Command, CommandId, Scheduler};
use strider_common::hal::gyro::Gyro;
use strider_common::hal::motor::MotorController;
use strider_common::io::controller::{self, Controller};
use strider_common::io::dashboard::Dashboard;
use tracing::info;

use crate::commands::{Climb, Collect, Drive, MoveBalls, Shoot, TelemetrySources, UpdateStats};
use crate::config::RobotConfig;
use crate::error::RobotError;
use crate::routine::{AutoTuning, RoutineSelector};
use crate::subsystems::{
    Climber, Collector, Drivetrain, Hopper, Shooter, Stats, SubsystemHandle,
};

/// Hardware the robot is built from.
pub struct Hardware {
    pub left_drive: Box<dyn MotorController>,
    pub right_drive: Box<dyn MotorController>,
    pub collector: Box<dyn MotorController>,
    pub shooter: Box<dyn MotorController>,
    pub hopper: Box<dyn MotorController>,
    pub climber: Box<dyn MotorController>,
    pub gyro: Arc<dyn Gyro>,
    /// Connected controllers by driver-station port.
    pub controllers: Vec<(u8, Arc<dyn Controller>)>,
}

impl Hardware {
    fn controller(&self, port: u8) -> Result<Arc<dyn Controller>, RobotError> {
        self.controllers
            .iter()
            .find(|(p, _)| *p == port)
            .map(|(_, c)| Arc::clone(c))
            .ok_or(RobotError::MissingController { port })
    }
}

/// Default command ids, one per subsystem.
#[derive(Debug, Clone, Copy)]
pub struct DefaultCommands {
    pub drive: CommandId,
    pub collect: CommandId,
    pub shoot: CommandId,
    pub move_balls: CommandId,
    pub climb: CommandId,
    pub update_stats: CommandId,
}

pub struct RobotContainer {
    drivetrain: SubsystemHandle<Drivetrain>,
    collector: SubsystemHandle<Collector>,
    shooter: SubsystemHandle<Shooter>,
    hopper: SubsystemHandle<Hopper>,
    climber: SubsystemHandle<Climber>,
    stats: SubsystemHandle<Stats>,
    gyro: Arc<dyn Gyro>,
    dashboard: Arc<dyn Dashboard>,
    selector: RoutineSelector,
    defaults: DefaultCommands,
}

impl RobotContainer {
    /// Register subsystems and bind their default commands.
    ///
    /// # Errors
    /// - `RobotError::MissingController` if a configured port is empty.
    /// - `RobotError::Scheduler` if registration fails (e.g. the scheduler
    ///   already holds subsystems with the same names).
    pub fn new(
        config: &RobotConfig,
        hardware: Hardware,
        dashboard: Arc<dyn Dashboard>,
        scheduler: &mut Scheduler,
    ) -> Result<Self, RobotError> {
        let driver = hardware.controller(config.controllers.driver_port)?;
        let operator = hardware.controller(config.controllers.operator_port)?;
        let Hardware {
            left_drive,
            right_drive,
            collector,
            shooter,
            hopper,
            climber,
            gyro,
            ..
        } = hardware;

        let drivetrain = SubsystemHandle::register(
            scheduler,
            Drivetrain::NAME,
            Drivetrain::new(left_drive, right_drive),
        )?;
        let collector = SubsystemHandle::register(scheduler, Collector::NAME, Collector::new(collector))?;
        let shooter = SubsystemHandle::register(scheduler, Shooter::NAME, Shooter::new(shooter))?;
        let hopper = SubsystemHandle::register(scheduler, Hopper::NAME, Hopper::new(hopper))?;
        let climber = SubsystemHandle::register(scheduler, Climber::NAME, Climber::new(climber))?;
        let stats = SubsystemHandle::register(scheduler, Stats::NAME, Stats::new(Arc::clone(&dashboard)))?;

        let b = &config.bindings;
        let speeds = &config.speeds;

        let drive = Drive::new(
            drivetrain.clone(),
            controller::axis(&driver, b.drive_speed_axis),
            controller::axis(&driver, b.drive_rotation_axis),
        );
        let collect = Collect::new(
            collector.clone(),
            controller::button(&driver, b.collect_button),
            speeds.intake,
        );
        let shoot = Shoot::new(
            shooter.clone(),
            controller::button(&operator, b.shoot_button),
            speeds.shooter,
        );
        let move_balls = MoveBalls::new(
            hopper.clone(),
            controller::button_pressed(&operator, b.hopper_toggle_button),
            speeds.hopper,
        );
        let climb = Climb::new(
            climber.clone(),
            controller::button_pressed(&operator, b.climb_toggle_button),
            speeds.climber,
        );
        let update_stats = UpdateStats::new(
            stats.clone(),
            controller::always(),
            TelemetrySources {
                drivetrain: drivetrain.clone(),
                collector: collector.clone(),
                shooter: shooter.clone(),
                hopper: hopper.clone(),
                climber: climber.clone(),
                gyro: Arc::clone(&gyro),
            },
        );

        let defaults = DefaultCommands {
            drive: scheduler.register_default_command(drivetrain.id(), Box::new(drive))?,
            collect: scheduler.register_default_command(collector.id(), Box::new(collect))?,
            shoot: scheduler.register_default_command(shooter.id(), Box::new(shoot))?,
            move_balls: scheduler.register_default_command(hopper.id(), Box::new(move_balls))?,
            climb: scheduler.register_default_command(climber.id(), Box::new(climb))?,
            update_stats: scheduler.register_default_command(stats.id(), Box::new(update_stats))?,
        };

        let selector = RoutineSelector::new(
            drivetrain.clone(),
            collector.clone(),
            shooter.clone(),
            hopper.clone(),
            Arc::clone(&gyro),
            AutoTuning::from_config(config),
        );

        info!(
            subsystems = scheduler.subsystem_count(),
            driver_port = config.controllers.driver_port,
            operator_port = config.controllers.operator_port,
            "robot container ready"
        );

        Ok(Self {
            drivetrain,
            collector,
            shooter,
            hopper,
            climber,
            stats,
            gyro,
            dashboard,
            selector,
            defaults,
        })
    }

    /// Fresh autonomous routine for the key currently on the dashboard.
    pub fn autonomous_command(&self) -> Result<Box<dyn Command>, RobotError> {
        let routine = self.selector.select_from(self.dashboard.as_ref())?;
        Ok(Box::new(routine))
    }

    pub fn selector(&self) -> &RoutineSelector {
        &self.selector
    }

    pub fn defaults(&self) -> DefaultCommands {
        self.defaults
    }

    pub fn dashboard(&self) -> &Arc<dyn Dashboard> {
        &self.dashboard
    }

    pub fn gyro(&self) -> &Arc<dyn Gyro> {
        &self.gyro
    }

    pub fn drivetrain(&self) -> &SubsystemHandle<Drivetrain> {
        &self.drivetrain
    }

    pub fn collector(&self) -> &SubsystemHandle<Collector> {
        &self.collector
    }

    pub fn shooter(&self) -> &SubsystemHandle<Shooter> {
        &self.shooter
    }

    pub fn hopper(&self) -> &SubsystemHandle<Hopper> {
        &self.hopper
    }

    pub fn climber(&self) -> &SubsystemHandle<Climber> {
        &self.climber
    }

    pub fn stats(&self) -> &SubsystemHandle<Stats> {
        &self.stats
    }
}
