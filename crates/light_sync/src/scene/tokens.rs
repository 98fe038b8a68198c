//! Light attribute names and declared prim type names

/// Declared prim type of a cylinder light
pub const CYLINDER_LIGHT: &str = "cylinderLight";
/// Declared prim type of a disk light
pub const DISK_LIGHT: &str = "diskLight";
/// Declared prim type of a distant light
pub const DISTANT_LIGHT: &str = "distantLight";
/// Declared prim type of a dome light
pub const DOME_LIGHT: &str = "domeLight";
/// Declared prim type of a rect light
pub const RECT_LIGHT: &str = "rectLight";
/// Declared prim type of a sphere light
pub const SPHERE_LIGHT: &str = "sphereLight";

/// Local-to-world transform attribute
pub const TRANSFORM: &str = "xformOp:transform";
/// Overall visibility
pub const VISIBILITY: &str = "visibility";
/// Visibility to camera rays
pub const VISIBILITY_CAMERA: &str = "visibility:camera";
/// Visibility to shadow rays
pub const VISIBILITY_SHADOW: &str = "visibility:shadow";

/// Light color
pub const COLOR: &str = "inputs:color";
/// Light intensity
pub const INTENSITY: &str = "inputs:intensity";
/// Diffuse multiplier
pub const DIFFUSE: &str = "inputs:diffuse";
/// Exposure, in stops
pub const EXPOSURE: &str = "inputs:exposure";
/// Blackbody temperature, in Kelvin
pub const COLOR_TEMPERATURE: &str = "inputs:colorTemperature";
/// Whether the blackbody tint is applied
pub const ENABLE_COLOR_TEMPERATURE: &str = "inputs:enableColorTemperature";
/// Whether intensity is normalized by emitting area
pub const NORMALIZE: &str = "inputs:normalize";

/// Sphere/disk/cylinder radius
pub const RADIUS: &str = "inputs:radius";
/// Cylinder length
pub const LENGTH: &str = "inputs:length";
/// Rect width
pub const WIDTH: &str = "inputs:width";
/// Rect height
pub const HEIGHT: &str = "inputs:height";
/// Distant light angular diameter, in degrees
pub const ANGLE: &str = "inputs:angle";
/// Rect/dome texture file
pub const TEXTURE_FILE: &str = "inputs:texture:file";

/// Shaping focus
pub const SHAPING_FOCUS: &str = "inputs:shaping:focus";
/// Shaping focus tint
pub const SHAPING_FOCUS_TINT: &str = "inputs:shaping:focusTint";
/// Shaping cone angle, in degrees
pub const SHAPING_CONE_ANGLE: &str = "inputs:shaping:cone:angle";
/// Shaping cone softness
pub const SHAPING_CONE_SOFTNESS: &str = "inputs:shaping:cone:softness";
/// IES profile file
pub const SHAPING_IES_FILE: &str = "inputs:shaping:ies:file";
/// IES angle scale
pub const SHAPING_IES_ANGLE_SCALE: &str = "inputs:shaping:ies:angleScale";
/// Whether the IES profile is normalized
pub const SHAPING_IES_NORMALIZE: &str = "inputs:shaping:ies:normalize";
