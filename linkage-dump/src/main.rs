// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use ansi_term::Colour::Green;
use clap::Parser;

use linkage_core::chain::{Chain, Joint};
use linkage_core::geometry::Axis;
use linkage_core::nalgebra as na;

use log::{debug, info};

/// Fixed offset of the first joint with respect to the world frame.
const BASE_OFFSET: (f64, f64, f64) = (3.0, 2.0, 0.0);
/// Radius of the joint spheres in the reference geometry.
const JOINT_RADIUS: f64 = 0.4;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Serial arm forward kinematics dump", long_about = None)]
struct Args {
    /// Link lengths.
    #[arg(long, value_delimiter = ',', default_value = "5.0,8.0,3.0")]
    lengths: Vec<f64>,

    /// Joint angles in degrees.
    #[arg(long, value_delimiter = ',', default_value = "30.0,-50.0,-30.0,0.0")]
    angles: Vec<f64>,

    /// Chain description from a JSON file instead of the built-in arm.
    #[arg(long)]
    chain: Option<std::path::PathBuf>,

    /// Solve a program of joint angle vectors from a JSON file.
    #[arg(long)]
    program: Option<std::path::PathBuf>,

    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(serde::Deserialize)]
struct JointDescription {
    name: String,
    axis: Axis,
    #[serde(default)]
    angle: f64,
    origin: [f64; 3],
}

/// Assemble the demonstration arm from link lengths and joint angles.
///
/// The first joint sits at the fixed base offset. Every following joint is
/// offset along the parent x-axis by the preceding link length padded past
/// the joint spheres; the effector joint clears a single joint radius.
fn build_arm(lengths: &[f64], angles: &[f64]) -> Result<Chain, linkage_core::Error> {
    if angles.len() != lengths.len() + 1 {
        return Err(linkage_core::Error::DimensionMismatch {
            expected: lengths.len() + 1,
            actual: angles.len(),
        });
    }

    let mut chain = Chain::new().add_joint(
        Joint::new("base", Axis::Z)
            .set_angle(angles[0])
            .set_origin_translation(BASE_OFFSET.0, BASE_OFFSET.1, BASE_OFFSET.2),
    );

    for (idx, length) in lengths.iter().enumerate() {
        let last = idx == lengths.len() - 1;

        let name = if last {
            "effector".to_string()
        } else {
            format!("link{}", idx + 1)
        };
        let clearance = if last {
            JOINT_RADIUS
        } else {
            2.0 * JOINT_RADIUS
        };

        chain = chain.add_joint(
            Joint::new(name, Axis::Z)
                .set_angle(angles[idx + 1])
                .set_origin_translation(length + clearance, 0.0, 0.0),
        );
    }

    Ok(chain)
}

fn print_solution(chain: &Chain) -> anyhow::Result<()> {
    let solution = chain.solve()?;

    for (joint, pose) in chain.joints().iter().zip(solution.poses()) {
        let point = pose.transform_point(&na::Point3::origin());

        debug!(
            "Frame {:<10} X {:>+7.2} Y {:>+7.2} Z {:>+7.2}",
            joint.name(),
            point.x,
            point.y,
            point.z
        );
    }

    let effector = solution.end_effector();

    info!(
        "Effector point: {}",
        Green.paint(format!(
            "[{:.2}, {:.2}, {:.2}]",
            effector.x, effector.y, effector.z
        ))
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_config = simplelog::ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_location_level(log::LevelFilter::Off)
        .build();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let chain = if let Some(path) = &args.chain {
        let str = std::fs::read_to_string(path)?;
        let description: Vec<JointDescription> = serde_json::from_str(&str)?;

        description.into_iter().fold(Chain::new(), |chain, joint| {
            chain.add_joint(
                Joint::new(joint.name, joint.axis)
                    .set_angle(joint.angle)
                    .set_origin_translation(joint.origin[0], joint.origin[1], joint.origin[2]),
            )
        })
    } else {
        build_arm(&args.lengths, &args.angles)?
    };

    debug!("Configured: {:?}", chain);

    if let Some(path) = args.program {
        let str = std::fs::read_to_string(path)?;
        let program: Vec<Vec<f64>> = serde_json::from_str(&str)?;

        for (idx, angles) in program.iter().enumerate() {
            debug!("Configuration {:2}: {:?}", idx, angles);

            print_solution(&chain.with_angles(angles)?)?;
        }
    } else {
        print_solution(&chain)?;
    }

    Ok(())
}
