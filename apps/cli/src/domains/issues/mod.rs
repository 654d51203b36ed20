use anyhow::Result;
use clap::Args;
use pe_room_model::{detect_issues, detect_sub_area_candidates, Issue, Location, SubAreaCandidate};
use serde::Serialize;

use crate::{context::Context, util::prelude::*};

#[derive(Args, Debug)]
pub struct IssuesArgs {
	/// Also classify every detected sub-area candidate with its suggested type
	#[arg(long, default_value_t = false)]
	pub accept_suggestions: bool,
}

#[derive(Debug, Serialize)]
pub struct IssuesOutput {
	pub issues: Vec<Issue>,
	pub sub_area_candidates: Vec<SubAreaCandidate>,
}

pub fn run(ctx: &Context, args: IssuesArgs) -> Result<()> {
	if args.accept_suggestions {
		let accepted = ctx.edit_session(|draft| {
			let candidates = detect_sub_area_candidates(draft.working());
			Ok(candidates
				.into_iter()
				.filter_map(|candidate| {
					let kind = candidate.suggested.sub_area_type?;
					draft.assign_sub_area_type(
						candidate.location_index,
						candidate.room_index,
						kind,
						Some(candidate.suggested.material_applicable),
					)
				})
				.count())
		})?;
		println!("Classified {accepted} rooms as sub-areas");
		return Ok(());
	}

	let session = ctx.load_session()?;
	let out = IssuesOutput {
		issues: detect_issues(&session.measurement_data),
		sub_area_candidates: detect_sub_area_candidates(&session.measurement_data),
	};

	print_output!(ctx, &out, |o: &IssuesOutput| {
		print_issues(&session.measurement_data, o);
	});

	Ok(())
}

fn print_issues(locations: &[Location], out: &IssuesOutput) {
	if out.issues.is_empty() && out.sub_area_candidates.is_empty() {
		println!("No issues found");
		return;
	}

	let room_name = |location_index: usize, room_index: usize| {
		locations
			.get(location_index)
			.and_then(|location| location.rooms.get(room_index))
			.map_or_else(String::new, |room| display_name(room.name()))
	};

	if !out.issues.is_empty() {
		let mut rows = table(vec!["Location", "Room", "Problem", "Suggested name"]);
		for issue in &out.issues {
			let problem = match issue {
				Issue::EmptyName { .. } => "blank name",
				Issue::DuplicateName { .. } => "duplicate name",
			};
			rows.add_row(vec![
				issue.location_index().to_string(),
				format!(
					"{} {}",
					issue.room_index(),
					room_name(issue.location_index(), issue.room_index())
				),
				problem.to_string(),
				issue.suggestion().to_string(),
			]);
		}
		println!("{rows}");
		println!("Run 'pre-estimate fix-names' to apply the suggested names");
		println!();
	}

	if !out.sub_area_candidates.is_empty() {
		let mut rows = table(vec!["Location", "Room", "Looks like", "Confidence"]);
		for candidate in &out.sub_area_candidates {
			rows.add_row(vec![
				candidate.location_index.to_string(),
				format!(
					"{} {}",
					candidate.room_index,
					room_name(candidate.location_index, candidate.room_index)
				),
				candidate
					.suggested
					.sub_area_type
					.as_ref()
					.map_or_else(String::new, ToString::to_string),
				candidate
					.suggested
					.detection_confidence
					.clone()
					.unwrap_or_default(),
			]);
		}
		println!("{rows}");
		println!("Run 'pre-estimate merge <location> <room>' to attach a sub-area to its room");
	}
}
