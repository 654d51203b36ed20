mod args;

use anyhow::{bail, Result};
use clap::Subcommand;
use pe_room_model::{
	detect_issues, find_merge_target, Draft, InvalidOpenings, InvalidOpeningsChoice, MergeOutcome,
	MergeTarget, Opening, Room, SkipReason, SubAreaType,
};
use tracing::warn;

use crate::{
	context::Context,
	util::{
		output::{print_measurements, print_openings},
		prelude::*,
	},
};

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum EditCmd {
	/// Merge two rooms, or a room with the room it most likely belongs to
	Merge(MergeArgs),
	/// Split a merged room back into its parts
	Unmerge(RoomArgs),
	/// Rename a room
	Rename(RenameArgs),
	/// Classify a room as a sub-area, a standalone room, or clear its classification
	Classify(ClassifyArgs),
	/// List or remove openings a sub-area type does not allow
	CleanOpenings(CleanOpeningsArgs),
	/// Rename every blank or repeated room to its suggested name
	FixNames,
	/// Show one room with its measurements and openings
	Room(RoomArgs),
	/// Manage the openings of a room
	#[command(subcommand)]
	Opening(OpeningCmd),
}

#[derive(Subcommand, Debug)]
pub enum OpeningCmd {
	/// Add an opening to a room
	Add(OpeningAddArgs),
	/// Replace the opening at an index
	Update(OpeningUpdateArgs),
	/// Remove the opening at an index
	Remove(OpeningRemoveArgs),
}

pub fn run(ctx: &Context, cmd: EditCmd) -> Result<()> {
	match cmd {
		EditCmd::Merge(args) => merge(ctx, &args),
		EditCmd::Unmerge(RoomArgs { location, room }) => {
			if ctx.edit_session(|draft| Ok(draft.unmerge_room(location, room)))? {
				println!("Unmerged room {room} in location {location}");
			} else {
				println!("Room {room} in location {location} is not a merged room");
			}
			Ok(())
		}
		EditCmd::Rename(RenameArgs {
			location,
			room,
			name,
		}) => {
			if !ctx.edit_session(|draft| Ok(draft.rename_room(location, room, name.as_str())))? {
				bail!("No room {room} in location {location}");
			}
			println!("Renamed room {room} to '{name}'");
			Ok(())
		}
		EditCmd::Classify(args) => classify(ctx, &args),
		EditCmd::CleanOpenings(args) => clean_openings(ctx, &args),
		EditCmd::FixNames => {
			let renamed = ctx.edit_session(|draft| {
				let issues = detect_issues(draft.working());
				Ok(draft.apply_suggested_names(&issues))
			})?;
			println!("Renamed {renamed} rooms");
			Ok(())
		}
		EditCmd::Room(RoomArgs { location, room }) => {
			let session = ctx.load_session()?;
			let Some(found) = session
				.measurement_data
				.get(location)
				.and_then(|loc| loc.rooms.get(room))
			else {
				bail!("No room {room} in location {location}");
			};

			print_output!(ctx, found, |r: &Room| {
				println!("{}", display_name(r.name()));
				if let Room::Merged(merged) = r {
					for (idx, sub_area) in merged.sub_areas.iter().enumerate() {
						println!(
							"  sub-area {idx}: {} ({:.2} sqft{})",
							sub_area.kind,
							sub_area.measurements.floor_area_sqft,
							if sub_area.material_applicable { "" } else { ", no material" }
						);
					}
				}
				print_measurements(r.effective_measurements());
				print_openings(&r.effective_measurements().openings);
			});
			Ok(())
		}
		EditCmd::Opening(cmd) => opening(ctx, cmd),
	}
}

fn merge(ctx: &Context, args: &MergeArgs) -> Result<()> {
	let MergeArgs {
		location,
		room,
		with,
	} = *args;

	let outcome = ctx.edit_session(|draft| {
		let target = match with {
			Some(target) => target,
			None => {
				let Some(loc) = draft.working().get(location) else {
					bail!("No location {location}");
				};
				match find_merge_target(loc, room) {
					MergeTarget::Found { index } => index,
					MergeTarget::NotFound => {
						bail!("No room to merge room {room} into; pass --with to pick one")
					}
				}
			}
		};

		Ok(draft.merge_rooms(location, target, room))
	})?;

	match outcome {
		MergeOutcome::Merged(kind) => println!("Merged room {room} ({kind:?})"),
		MergeOutcome::Skipped(SkipReason::SameRoom) => {
			warn!("Refusing to merge room {room} with itself");
			println!("A room can't be merged with itself");
		}
		MergeOutcome::Skipped(reason) => bail!("Nothing merged: {reason:?}"),
	}

	Ok(())
}

fn classify(ctx: &Context, args: &ClassifyArgs) -> Result<()> {
	let ClassifyArgs {
		location,
		room,
		ref kind,
		no_material,
	} = *args;

	match kind.trim().to_lowercase().as_str() {
		"standalone" => {
			if !ctx.edit_session(|draft| Ok(draft.mark_standalone(location, room)))? {
				bail!("Room {room} in location {location} can't be marked standalone");
			}
			println!("Marked room {room} as standalone");
		}
		"none" => {
			if ctx.edit_session(|draft| Ok(draft.clear_classification(location, room)))? {
				println!("Cleared classification of room {room}");
			} else {
				println!("Room {room} had no classification");
			}
		}
		_ => {
			let kind = SubAreaType::parse(kind);
			let material = no_material.then_some(false);

			let Some(dropped) = ctx.edit_session(|draft| {
				Ok(draft.assign_sub_area_type(location, room, kind.clone(), material))
			})?
			else {
				bail!("Room {room} in location {location} is not a plain room");
			};

			println!("Classified room {room} as {kind}");
			if !dropped.is_empty() {
				println!("Dropped {} openings a {kind} can't have:", dropped.len());
				print_openings(&dropped);
			}
		}
	}

	Ok(())
}

fn clean_openings(ctx: &Context, args: &CleanOpeningsArgs) -> Result<()> {
	let CleanOpeningsArgs {
		room: RoomArgs { location, room },
		remove,
	} = *args;

	if remove {
		let removed = ctx.edit_session(|draft| {
			Ok(draft.resolve_invalid_openings(location, room, InvalidOpeningsChoice::RemoveInvalid))
		})?;
		println!("Removed {removed} invalid openings");
		return Ok(());
	}

	let session = ctx.load_session()?;
	let invalid = Draft::new(session.measurement_data).invalid_openings(location, room);

	print_output!(ctx, &invalid, |invalid: &Vec<InvalidOpenings>| {
		if invalid.is_empty() {
			println!("All openings fit their sub-area types");
			return;
		}
		for group in invalid {
			let whose = group
				.sub_area_index
				.map_or_else(|| "room".to_string(), |idx| format!("sub-area {idx}"));
			println!(
				"{} openings in {whose} ({}) are not allowed:",
				group.count(),
				group.sub_area_type
			);
			print_openings(&group.openings);
		}
		println!("Run again with --remove to drop them");
	});

	Ok(())
}

fn opening(ctx: &Context, cmd: OpeningCmd) -> Result<()> {
	match cmd {
		OpeningCmd::Add(args) => {
			let opening = args.opening.to_opening()?;
			let RoomArgs { location, room } = args.room;
			if !ctx.edit_session(|draft| Ok(draft.add_opening(location, room, opening)))? {
				bail!("No room {room} in location {location}");
			}
			println!("Added opening to room {room}");
		}
		OpeningCmd::Update(args) => {
			let opening = args.opening.to_opening()?;
			let RoomArgs { location, room } = args.room;
			let index = args.index;
			if !ctx.edit_session(|draft| Ok(draft.update_opening(location, room, index, opening)))? {
				bail!("No opening {index} on room {room} in location {location}");
			}
			println!("Updated opening {index} of room {room}");
		}
		OpeningCmd::Remove(OpeningRemoveArgs {
			room: RoomArgs { location, room },
			index,
		}) => {
			let Some(removed) =
				ctx.edit_session(|draft| Ok(draft.remove_opening(location, room, index)))?
			else {
				bail!("No opening {index} on room {room} in location {location}");
			};
			print_output!(ctx, &removed, |o: &Opening| {
				println!("Removed {} {}", o.kind, o.size);
			});
		}
	}

	Ok(())
}
