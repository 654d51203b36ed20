use clap::Args;
use pe_room_model::{Opening, OpeningType};

/// A room addressed by its position, as printed by `show`.
#[derive(Args, Debug, Clone, Copy)]
pub struct RoomArgs {
	/// Location index
	pub location: usize,
	/// Room index within the location
	pub room: usize,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct MergeArgs {
	/// Location index
	pub location: usize,
	/// Room to merge away
	pub room: usize,
	/// Room that absorbs it. Picked from the room's name when left out
	#[arg(long)]
	pub with: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
	pub location: usize,
	pub room: usize,
	/// New room name
	pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
	pub location: usize,
	pub room: usize,
	/// Sub-area type (closet, pantry, alcove, walk_in_shower, bathtub, shower_booth, cabinet,
	/// fixture or any custom name), `standalone`, or `none` to clear the classification
	pub kind: String,
	/// Flooring material does not go into this sub-area
	#[arg(long, default_value_t = false)]
	pub no_material: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct CleanOpeningsArgs {
	#[command(flatten)]
	pub room: RoomArgs,
	/// Remove the openings instead of listing them
	#[arg(long, default_value_t = false)]
	pub remove: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OpeningArgs {
	/// door, window or open_wall
	#[arg(long = "type")]
	pub kind: String,
	/// Size as written on the plan, e.g. 3' X 6'8"
	#[arg(long, default_value = "")]
	pub size: String,
	/// Name of the room on the other side
	#[arg(long)]
	pub opens_to: Option<String>,
}

impl OpeningArgs {
	pub fn to_opening(&self) -> anyhow::Result<Opening> {
		let kind = self.kind.parse::<OpeningType>()?;
		let opening = Opening::new(kind, self.size.as_str());

		Ok(match &self.opens_to {
			Some(name) => opening.opening_to(name.as_str()),
			None => opening,
		})
	}
}

#[derive(Args, Debug, Clone)]
pub struct OpeningAddArgs {
	#[command(flatten)]
	pub room: RoomArgs,
	#[command(flatten)]
	pub opening: OpeningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OpeningUpdateArgs {
	#[command(flatten)]
	pub room: RoomArgs,
	/// Index of the opening to replace
	pub index: usize,
	#[command(flatten)]
	pub opening: OpeningArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OpeningRemoveArgs {
	#[command(flatten)]
	pub room: RoomArgs,
	/// Index of the opening to remove
	pub index: usize,
}
