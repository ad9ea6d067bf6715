use {
    crate::{
        error::Error,
        math::{vec2, vec3, Vec2, Vec3},
    },
    serde::{Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter},
        str::FromStr,
    },
};

/// The persistent part of a camera: where it is and where it looks.
///
/// The text form is two lines of whitespace separated floats: the position, then the yaw and
/// pitch in radians.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CameraParams {
    pub position: Vec3,
    pub rotation: Vec2,
}

impl Display for CameraParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {} {}",
            self.position.x, self.position.y, self.position.z
        )?;
        writeln!(f, "{} {}", self.rotation.x, self.rotation.y)
    }
}

impl FromStr for CameraParams {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0f32; 5];
        let mut fields = s.split_whitespace();

        for value in &mut values {
            *value = fields.next().ok_or(Error::InvalidData)?.parse()?;
        }

        if fields.next().is_some() {
            return Err(Error::InvalidData);
        }

        Ok(Self {
            position: vec3(values[0], values[1], values[2]),
            rotation: vec2(values[3], values[4]),
        })
    }
}
