//! Form state for a prospective remodeling project.
//!
//! A single `FormState` record holds every user selection. All mutation goes
//! through `FormState::apply`, a pure reducer over the closed `FieldUpdate`
//! sum type, so invalid field/value combinations cannot be expressed and the
//! cross-field rules (project-type reset, tile sentinel exclusivity) live in
//! exactly one place.

/// The eight project categories. Drives which other fields are relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Kitchen,
    Bathroom,
    Closet,
    LaundryRoom,
    HomeOffice,
    EntertainmentCenter,
    WetDryBar,
    CustomProject,
}

impl ProjectType {
    pub const ALL: [ProjectType; 8] = [
        ProjectType::Kitchen,
        ProjectType::Bathroom,
        ProjectType::Closet,
        ProjectType::LaundryRoom,
        ProjectType::HomeOffice,
        ProjectType::EntertainmentCenter,
        ProjectType::WetDryBar,
        ProjectType::CustomProject,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Kitchen => "Kitchen",
            ProjectType::Bathroom => "Bathroom",
            ProjectType::Closet => "Closet",
            ProjectType::LaundryRoom => "Laundry Room",
            ProjectType::HomeOffice => "Home Office",
            ProjectType::EntertainmentCenter => "Entertainment Center",
            ProjectType::WetDryBar => "Wet & Dry Bar",
            ProjectType::CustomProject => "Custom Project",
        }
    }

    /// Every type except Bathroom carries a cabinet line; bathrooms carry a
    /// vanity line instead.
    pub fn has_cabinetry(self) -> bool {
        !matches!(self, ProjectType::Bathroom)
    }

    /// Closets are cabinetry-only; everything else gets the countertop,
    /// plumbing, and tile sections.
    pub fn has_detail_sections(self) -> bool {
        !matches!(self, ProjectType::Closet)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinetLine {
    FabuwoodAllure,
    FabuwoodQuest,
    ForevermarkNova,
    ForevermarkSignature,
    JkGreigeShaker,
    JkWhiteShaker,
    NextGenGLux,
    CncLuxor,
    UsCabinetryFrameless,
}

impl CabinetLine {
    pub const ALL: [CabinetLine; 9] = [
        CabinetLine::FabuwoodAllure,
        CabinetLine::FabuwoodQuest,
        CabinetLine::ForevermarkNova,
        CabinetLine::ForevermarkSignature,
        CabinetLine::JkGreigeShaker,
        CabinetLine::JkWhiteShaker,
        CabinetLine::NextGenGLux,
        CabinetLine::CncLuxor,
        CabinetLine::UsCabinetryFrameless,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CabinetLine::FabuwoodAllure => "Fabuwood Allure",
            CabinetLine::FabuwoodQuest => "Fabuwood Quest",
            CabinetLine::ForevermarkNova => "Forevermark Nova",
            CabinetLine::ForevermarkSignature => "Forevermark Signature",
            CabinetLine::JkGreigeShaker => "J&K Greige Shaker",
            CabinetLine::JkWhiteShaker => "J&K White Shaker",
            CabinetLine::NextGenGLux => "NextGen G-Lux",
            CabinetLine::CncLuxor => "CNC Luxor",
            CabinetLine::UsCabinetryFrameless => "US Cabinetry Frameless",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VanityLine {
    Fabuwood,
    Forevermark,
    Cnc,
    NextGen,
    UsCabinetry,
}

impl VanityLine {
    pub const ALL: [VanityLine; 5] = [
        VanityLine::Fabuwood,
        VanityLine::Forevermark,
        VanityLine::Cnc,
        VanityLine::NextGen,
        VanityLine::UsCabinetry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VanityLine::Fabuwood => "Fabuwood Vanities",
            VanityLine::Forevermark => "Forevermark Vanities",
            VanityLine::Cnc => "CNC Vanities",
            VanityLine::NextGen => "NextGen Vanities",
            VanityLine::UsCabinetry => "US Cabinetry Vanities",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountertopMaterial {
    NoChange,
    Granite,
    Quartz,
    Marble,
    Quartzite,
    Soapstone,
}

impl CountertopMaterial {
    pub const ALL: [CountertopMaterial; 6] = [
        CountertopMaterial::NoChange,
        CountertopMaterial::Granite,
        CountertopMaterial::Quartz,
        CountertopMaterial::Marble,
        CountertopMaterial::Quartzite,
        CountertopMaterial::Soapstone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CountertopMaterial::NoChange => "No Change / Keep Existing",
            CountertopMaterial::Granite => "Granite",
            CountertopMaterial::Quartz => "Quartz",
            CountertopMaterial::Marble => "Marble",
            CountertopMaterial::Quartzite => "Quartzite",
            CountertopMaterial::Soapstone => "Soapstone",
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == CountertopMaterial::NoChange
    }
}

/// Areas that can receive tile. `NoTileWork` is the sentinel member: the
/// selection set always contains it alone or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileArea {
    NoTileWork,
    KitchenBacksplash,
    KitchenFloor,
    BathroomFloor,
    ShowerSurroundWalls,
    BathroomAccentWall,
}

impl TileArea {
    pub const ALL: [TileArea; 6] = [
        TileArea::NoTileWork,
        TileArea::KitchenBacksplash,
        TileArea::KitchenFloor,
        TileArea::BathroomFloor,
        TileArea::ShowerSurroundWalls,
        TileArea::BathroomAccentWall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TileArea::NoTileWork => "No Tile Work",
            TileArea::KitchenBacksplash => "Kitchen Backsplash",
            TileArea::KitchenFloor => "Kitchen Floor",
            TileArea::BathroomFloor => "Bathroom Floor",
            TileArea::ShowerSurroundWalls => "Shower/Tub Surround Walls",
            TileArea::BathroomAccentWall => "Bathroom Accent Wall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMaterial {
    CeramicPorcelain,
    NaturalStone,
    GlassMosaic,
}

impl TileMaterial {
    pub const ALL: [TileMaterial; 3] = [
        TileMaterial::CeramicPorcelain,
        TileMaterial::NaturalStone,
        TileMaterial::GlassMosaic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TileMaterial::CeramicPorcelain => "Ceramic / Porcelain (Standard)",
            TileMaterial::NaturalStone => "Natural Stone (Marble, Travertine)",
            TileMaterial::GlassMosaic => "Glass / Mosaic / Decorative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkType {
    KeepExisting,
    KitchenStainlessSteel,
    KitchenComposite,
    KitchenFireclay,
    BathroomUndermount,
    BathroomVessel,
}

impl SinkType {
    pub const ALL: [SinkType; 6] = [
        SinkType::KeepExisting,
        SinkType::KitchenStainlessSteel,
        SinkType::KitchenComposite,
        SinkType::KitchenFireclay,
        SinkType::BathroomUndermount,
        SinkType::BathroomVessel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SinkType::KeepExisting => "No New Sink / Keep Existing",
            SinkType::KitchenStainlessSteel => "Kitchen Sink - Stainless Steel",
            SinkType::KitchenComposite => "Kitchen Sink - Composite",
            SinkType::KitchenFireclay => "Kitchen Sink - Fireclay",
            SinkType::BathroomUndermount => "Bathroom Sink - Undermount",
            SinkType::BathroomVessel => "Bathroom Sink - Vessel",
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == SinkType::KeepExisting
    }

    fn is_kitchen(self) -> bool {
        matches!(
            self,
            SinkType::KitchenStainlessSteel | SinkType::KitchenComposite | SinkType::KitchenFireclay
        )
    }

    fn is_bathroom(self) -> bool {
        matches!(self, SinkType::BathroomUndermount | SinkType::BathroomVessel)
    }

    /// Sink choices narrowed by project type: kitchens see kitchen sinks,
    /// bathrooms see bathroom sinks, everything else sees the full list.
    pub fn options_for(project: ProjectType) -> Vec<SinkType> {
        Self::ALL
            .iter()
            .copied()
            .filter(|sink| match project {
                ProjectType::Kitchen => sink.is_sentinel() || sink.is_kitchen(),
                ProjectType::Bathroom => sink.is_sentinel() || sink.is_bathroom(),
                _ => true,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToiletType {
    KeepExisting,
    Standard,
    ComfortHeight,
    Smart,
}

impl ToiletType {
    pub const ALL: [ToiletType; 4] = [
        ToiletType::KeepExisting,
        ToiletType::Standard,
        ToiletType::ComfortHeight,
        ToiletType::Smart,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToiletType::KeepExisting => "No New Toilet / Keep Existing",
            ToiletType::Standard => "New Standard Toilet",
            ToiletType::ComfortHeight => "New Comfort Height Toilet",
            ToiletType::Smart => "New Smart Toilet",
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == ToiletType::KeepExisting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowerType {
    KeepExisting,
    StandardAlcoveTub,
    FreestandingTub,
    PrefabStall,
    CustomTileShower,
}

impl ShowerType {
    pub const ALL: [ShowerType; 5] = [
        ShowerType::KeepExisting,
        ShowerType::StandardAlcoveTub,
        ShowerType::FreestandingTub,
        ShowerType::PrefabStall,
        ShowerType::CustomTileShower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShowerType::KeepExisting => "No Change / Keep Existing Tub/Shower",
            ShowerType::StandardAlcoveTub => "New Bathtub (Standard Alcove)",
            ShowerType::FreestandingTub => "New Bathtub (Freestanding/Soaking)",
            ShowerType::PrefabStall => "New Shower (Prefab Stall)",
            ShowerType::CustomTileShower => "Custom Tile Shower",
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == ShowerType::KeepExisting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFinish {
    KeepExisting,
    Standard,
    MidRange,
    Premium,
}

impl HardwareFinish {
    pub const ALL: [HardwareFinish; 4] = [
        HardwareFinish::KeepExisting,
        HardwareFinish::Standard,
        HardwareFinish::MidRange,
        HardwareFinish::Premium,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HardwareFinish::KeepExisting => "No New Hardware / Keep Existing",
            HardwareFinish::Standard => "Standard Finish (e.g., Brushed Nickel)",
            HardwareFinish::MidRange => "Mid-Range Finish (e.g., Matte Black, Brass)",
            HardwareFinish::Premium => "Premium/Designer Hardware",
        }
    }

    pub fn is_sentinel(self) -> bool {
        self == HardwareFinish::KeepExisting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalFeature {
    Island,
    NewFaucet,
    UnderCabinetLighting,
}

impl AdditionalFeature {
    pub const ALL: [AdditionalFeature; 3] = [
        AdditionalFeature::Island,
        AdditionalFeature::NewFaucet,
        AdditionalFeature::UnderCabinetLighting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdditionalFeature::Island => "Island",
            AdditionalFeature::NewFaucet => "New Faucet",
            AdditionalFeature::UnderCabinetLighting => "Under-Cabinet Lighting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BathroomType {
    MasterPrimary,
    Guest,
    PowderRoom,
    JackAndJill,
    Other,
}

impl BathroomType {
    pub const ALL: [BathroomType; 5] = [
        BathroomType::MasterPrimary,
        BathroomType::Guest,
        BathroomType::PowderRoom,
        BathroomType::JackAndJill,
        BathroomType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BathroomType::MasterPrimary => "Master/Primary Bathroom",
            BathroomType::Guest => "Guest Bathroom",
            BathroomType::PowderRoom => "Powder Room / Half Bath",
            BathroomType::JackAndJill => "Jack-and-Jill Bathroom",
            BathroomType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    CompleteGut,
    PartialRemodel,
    LayoutChanges,
    Expansion,
    CosmeticOnly,
}

impl ProjectScope {
    pub const ALL: [ProjectScope; 5] = [
        ProjectScope::CompleteGut,
        ProjectScope::PartialRemodel,
        ProjectScope::LayoutChanges,
        ProjectScope::Expansion,
        ProjectScope::CosmeticOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectScope::CompleteGut => "Complete gut renovation",
            ProjectScope::PartialRemodel => "Partial remodel",
            ProjectScope::LayoutChanges => "Layout changes (moving fixtures)",
            ProjectScope::Expansion => "Expansion (adding sq footage)",
            ProjectScope::CosmeticOnly => "Cosmetic updates only",
        }
    }
}

/// Field names, used with `field_relevant` to decide which inputs apply to
/// the current project type. The UI (section visibility) and the request
/// builder (block inclusion) both consult this, so they cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectType,
    Sqft,
    Location,
    CabinetLine,
    NumCabinets,
    HardwareFinish,
    CountertopMaterial,
    BathroomType,
    VanityLine,
    ProjectScope,
    HomeAge,
    TileAreas,
    TileMaterial,
    SinkType,
    ToiletType,
    ShowerType,
    AdditionalFeatures,
}

pub fn field_relevant(project: ProjectType, field: Field) -> bool {
    match field {
        Field::ProjectType | Field::Sqft | Field::Location | Field::AdditionalFeatures => true,
        // Shared between the cabinetry section and the bathroom vanity
        // section, so relevant for every project type.
        Field::NumCabinets | Field::HardwareFinish => true,
        Field::CabinetLine => project.has_cabinetry(),
        Field::BathroomType
        | Field::VanityLine
        | Field::ProjectScope
        | Field::HomeAge
        | Field::ToiletType
        | Field::ShowerType => project == ProjectType::Bathroom,
        Field::CountertopMaterial | Field::SinkType | Field::TileAreas | Field::TileMaterial => {
            project.has_detail_sections()
        }
    }
}

/// Everything the user has entered about the project. One record per
/// in-progress session; replaced wholesale on project-type change (location
/// excepted) and consumed read-only to build the estimate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub project_type: ProjectType,
    pub sqft: String,
    pub location: String,
    pub cabinet_line: CabinetLine,
    pub num_cabinets: String,
    pub hardware_finish: HardwareFinish,
    pub countertop_material: CountertopMaterial,
    pub bathroom_type: BathroomType,
    pub vanity_line: VanityLine,
    pub project_scope: Vec<ProjectScope>,
    pub home_age: String,
    pub tile_areas: Vec<TileArea>,
    pub tile_material: TileMaterial,
    pub sink_type: SinkType,
    pub toilet_type: ToiletType,
    pub shower_type: ShowerType,
    pub additional_features: Vec<AdditionalFeature>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            project_type: ProjectType::Kitchen,
            sqft: "150".to_string(),
            location: String::new(),
            cabinet_line: CabinetLine::FabuwoodAllure,
            num_cabinets: String::new(),
            hardware_finish: HardwareFinish::KeepExisting,
            countertop_material: CountertopMaterial::NoChange,
            bathroom_type: BathroomType::MasterPrimary,
            vanity_line: VanityLine::Fabuwood,
            project_scope: Vec::new(),
            home_age: String::new(),
            tile_areas: vec![TileArea::NoTileWork],
            tile_material: TileMaterial::CeramicPorcelain,
            sink_type: SinkType::KeepExisting,
            toilet_type: ToiletType::KeepExisting,
            shower_type: ShowerType::KeepExisting,
            additional_features: Vec::new(),
        }
    }
}

/// A single named field-update event. Each variant carries its own value
/// type, so an invalid field/value pairing cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    ProjectType(ProjectType),
    Sqft(String),
    Location(String),
    CabinetLine(CabinetLine),
    NumCabinets(String),
    HardwareFinish(HardwareFinish),
    CountertopMaterial(CountertopMaterial),
    BathroomType(BathroomType),
    VanityLine(VanityLine),
    ToggleScope(ProjectScope),
    HomeAge(String),
    ToggleTileArea(TileArea),
    TileMaterial(TileMaterial),
    SinkType(SinkType),
    ToiletType(ToiletType),
    ShowerType(ShowerType),
    ToggleFeature(AdditionalFeature),
}

fn toggle_member<T: PartialEq>(set: &mut Vec<T>, value: T) {
    if let Some(idx) = set.iter().position(|v| *v == value) {
        set.remove(idx);
    } else {
        set.push(value);
    }
}

impl FormState {
    /// Apply one field-update event and return the next state. Pure and
    /// total: no I/O, no failure path.
    pub fn apply(&self, update: FieldUpdate) -> FormState {
        let mut next = self.clone();
        match update {
            // Fields from one project type are meaningless for another, so a
            // type change replaces the whole record. Location is the one
            // field the user should never have to retype.
            FieldUpdate::ProjectType(project) => {
                next = FormState {
                    project_type: project,
                    location: self.location.clone(),
                    ..FormState::default()
                };
            }
            FieldUpdate::ToggleFeature(feature) => {
                toggle_member(&mut next.additional_features, feature);
            }
            FieldUpdate::ToggleScope(scope) => {
                toggle_member(&mut next.project_scope, scope);
            }
            FieldUpdate::ToggleTileArea(area) => {
                if next.tile_areas.contains(&area) {
                    next.tile_areas.retain(|a| *a != area);
                    // The set must never be empty.
                    if next.tile_areas.is_empty() {
                        next.tile_areas.push(TileArea::NoTileWork);
                    }
                } else if area == TileArea::NoTileWork {
                    next.tile_areas = vec![TileArea::NoTileWork];
                } else {
                    next.tile_areas.retain(|a| *a != TileArea::NoTileWork);
                    next.tile_areas.push(area);
                }
            }
            FieldUpdate::Sqft(value) => next.sqft = value,
            FieldUpdate::Location(value) => next.location = value,
            FieldUpdate::CabinetLine(value) => next.cabinet_line = value,
            FieldUpdate::NumCabinets(value) => next.num_cabinets = value,
            FieldUpdate::HardwareFinish(value) => next.hardware_finish = value,
            FieldUpdate::CountertopMaterial(value) => next.countertop_material = value,
            FieldUpdate::BathroomType(value) => next.bathroom_type = value,
            FieldUpdate::VanityLine(value) => next.vanity_line = value,
            FieldUpdate::HomeAge(value) => next.home_age = value,
            FieldUpdate::TileMaterial(value) => next.tile_material = value,
            FieldUpdate::SinkType(value) => next.sink_type = value,
            FieldUpdate::ToiletType(value) => next.toilet_type = value,
            FieldUpdate::ShowerType(value) => next.shower_type = value,
        }
        next
    }

    /// Fresh state for a new estimate, keeping only the location.
    pub fn reset_for_new_estimate(&self) -> FormState {
        FormState {
            location: self.location.clone(),
            ..FormState::default()
        }
    }

    /// True when tile areas other than the sentinel are selected. The set
    /// invariant guarantees the sentinel never coexists with a real area.
    pub fn has_tile_work(&self) -> bool {
        !self.tile_areas.contains(&TileArea::NoTileWork)
    }

    /// Submission is allowed once the two required free-text fields are
    /// filled in.
    pub fn can_submit(&self) -> bool {
        !self.location.is_empty() && !self.sqft.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_feature_twice_is_identity() {
        let state = FormState::default();
        let once = state.apply(FieldUpdate::ToggleFeature(AdditionalFeature::Island));
        assert!(once.additional_features.contains(&AdditionalFeature::Island));
        let twice = once.apply(FieldUpdate::ToggleFeature(AdditionalFeature::Island));
        assert_eq!(twice.additional_features, state.additional_features);
    }

    #[test]
    fn feature_toggles_preserve_insertion_order() {
        let state = FormState::default()
            .apply(FieldUpdate::ToggleFeature(AdditionalFeature::NewFaucet))
            .apply(FieldUpdate::ToggleFeature(AdditionalFeature::Island));
        assert_eq!(
            state.additional_features,
            vec![AdditionalFeature::NewFaucet, AdditionalFeature::Island]
        );
    }

    #[test]
    fn adding_tile_area_removes_sentinel() {
        let state = FormState::default();
        assert_eq!(state.tile_areas, vec![TileArea::NoTileWork]);

        let next = state.apply(FieldUpdate::ToggleTileArea(TileArea::BathroomFloor));
        assert_eq!(next.tile_areas, vec![TileArea::BathroomFloor]);
    }

    #[test]
    fn adding_sentinel_collapses_tile_areas() {
        let state = FormState::default()
            .apply(FieldUpdate::ToggleTileArea(TileArea::KitchenFloor))
            .apply(FieldUpdate::ToggleTileArea(TileArea::KitchenBacksplash));
        assert_eq!(
            state.tile_areas,
            vec![TileArea::KitchenFloor, TileArea::KitchenBacksplash]
        );

        let next = state.apply(FieldUpdate::ToggleTileArea(TileArea::NoTileWork));
        assert_eq!(next.tile_areas, vec![TileArea::NoTileWork]);
    }

    #[test]
    fn removing_last_tile_area_restores_sentinel() {
        let state = FormState::default()
            .apply(FieldUpdate::ToggleTileArea(TileArea::BathroomFloor))
            .apply(FieldUpdate::ToggleTileArea(TileArea::BathroomFloor));
        assert_eq!(state.tile_areas, vec![TileArea::NoTileWork]);
    }

    #[test]
    fn tile_areas_never_empty_and_sentinel_never_mixed() {
        // Walk a long toggle sequence and check the invariant at every step.
        let sequence = [
            TileArea::NoTileWork,
            TileArea::KitchenFloor,
            TileArea::BathroomFloor,
            TileArea::NoTileWork,
            TileArea::ShowerSurroundWalls,
            TileArea::ShowerSurroundWalls,
            TileArea::BathroomAccentWall,
            TileArea::KitchenBacksplash,
            TileArea::BathroomAccentWall,
            TileArea::KitchenBacksplash,
        ];
        let mut state = FormState::default();
        for area in sequence {
            state = state.apply(FieldUpdate::ToggleTileArea(area));
            assert!(!state.tile_areas.is_empty());
            if state.tile_areas.contains(&TileArea::NoTileWork) {
                assert_eq!(state.tile_areas.len(), 1);
            }
        }
    }

    #[test]
    fn project_type_change_resets_everything_but_location() {
        let state = FormState::default()
            .apply(FieldUpdate::Location("22030".to_string()))
            .apply(FieldUpdate::Sqft("300".to_string()))
            .apply(FieldUpdate::CountertopMaterial(CountertopMaterial::Quartzite))
            .apply(FieldUpdate::ToggleFeature(AdditionalFeature::Island))
            .apply(FieldUpdate::ToggleTileArea(TileArea::KitchenFloor));

        let next = state.apply(FieldUpdate::ProjectType(ProjectType::Bathroom));
        assert_eq!(next.project_type, ProjectType::Bathroom);
        assert_eq!(next.location, "22030");

        let defaults = FormState::default();
        assert_eq!(next.sqft, defaults.sqft);
        assert_eq!(next.countertop_material, defaults.countertop_material);
        assert_eq!(next.additional_features, defaults.additional_features);
        assert_eq!(next.tile_areas, defaults.tile_areas);
        assert_eq!(next.cabinet_line, defaults.cabinet_line);
        assert_eq!(next.hardware_finish, defaults.hardware_finish);
    }

    #[test]
    fn scalar_update_leaves_other_fields_untouched() {
        let state = FormState::default().apply(FieldUpdate::Location("Fairfax".to_string()));
        let next = state.apply(FieldUpdate::CabinetLine(CabinetLine::CncLuxor));
        assert_eq!(next.cabinet_line, CabinetLine::CncLuxor);
        assert_eq!(next.location, "Fairfax");
        assert_eq!(next.sqft, state.sqft);
        assert_eq!(next.project_type, state.project_type);
    }

    #[test]
    fn reset_for_new_estimate_keeps_location() {
        let state = FormState::default()
            .apply(FieldUpdate::ProjectType(ProjectType::Bathroom))
            .apply(FieldUpdate::Location("22030".to_string()))
            .apply(FieldUpdate::ToggleScope(ProjectScope::CompleteGut));
        let next = state.reset_for_new_estimate();
        assert_eq!(next.location, "22030");
        assert_eq!(next.project_type, ProjectType::Kitchen);
        assert!(next.project_scope.is_empty());
    }

    #[test]
    fn submission_gating() {
        let mut state = FormState::default();
        state.location = String::new();
        state.sqft = "150".to_string();
        assert!(!state.can_submit());

        state.location = "Fairfax".to_string();
        state.sqft = String::new();
        assert!(!state.can_submit());

        state.sqft = "150".to_string();
        assert!(state.can_submit());
    }

    #[test]
    fn relevance_predicate_by_project_type() {
        assert!(field_relevant(ProjectType::Kitchen, Field::CabinetLine));
        assert!(!field_relevant(ProjectType::Bathroom, Field::CabinetLine));
        assert!(field_relevant(ProjectType::Bathroom, Field::VanityLine));
        assert!(!field_relevant(ProjectType::Kitchen, Field::VanityLine));
        assert!(!field_relevant(ProjectType::Kitchen, Field::ToiletType));
        assert!(field_relevant(ProjectType::Bathroom, Field::ShowerType));

        // Closets are cabinetry-only.
        assert!(!field_relevant(ProjectType::Closet, Field::CountertopMaterial));
        assert!(!field_relevant(ProjectType::Closet, Field::TileAreas));
        assert!(!field_relevant(ProjectType::Closet, Field::SinkType));
        assert!(field_relevant(ProjectType::Closet, Field::CabinetLine));

        // Universally relevant fields.
        for project in ProjectType::ALL {
            assert!(field_relevant(project, Field::Sqft));
            assert!(field_relevant(project, Field::Location));
            assert!(field_relevant(project, Field::AdditionalFeatures));
            assert!(field_relevant(project, Field::NumCabinets));
        }
    }

    #[test]
    fn sink_options_narrowed_by_project_type() {
        let kitchen = SinkType::options_for(ProjectType::Kitchen);
        assert!(kitchen.contains(&SinkType::KeepExisting));
        assert!(kitchen.contains(&SinkType::KitchenFireclay));
        assert!(!kitchen.contains(&SinkType::BathroomVessel));

        let bathroom = SinkType::options_for(ProjectType::Bathroom);
        assert!(bathroom.contains(&SinkType::KeepExisting));
        assert!(bathroom.contains(&SinkType::BathroomUndermount));
        assert!(!bathroom.contains(&SinkType::KitchenComposite));

        let bar = SinkType::options_for(ProjectType::WetDryBar);
        assert_eq!(bar.len(), SinkType::ALL.len());
    }
}
