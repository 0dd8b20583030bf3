use ::serde::ser::SerializeStruct;
use ::serde::Deserialize;
use num_traits::Float;

use crate::{entity::Frame, matrix::Matrix, point::Point, vector::Vector};

#[derive(Deserialize)]
struct Rank1Data<T> {
    data: Vec<T>,
    frame: Frame,
}

#[derive(Deserialize)]
struct MatrixData<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

macro_rules! impl_serde_rank1 {
    ($ty:ident, $name:literal) => {
        impl<T, const D: usize> ::serde::Serialize for $ty<T, D>
        where
            T: Float + ::serde::Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let mut state = serializer.serialize_struct($name, 2)?;
                state.serialize_field("data", &self.as_array()[..])?;
                state.serialize_field("frame", &self.reference_frame())?;
                state.end()
            }
        }

        impl<'de, T, const D: usize> ::serde::Deserialize<'de> for $ty<T, D>
        where
            T: Float + ::serde::Deserialize<'de>,
        {
            fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
            where
                De: ::serde::Deserializer<'de>,
            {
                let Rank1Data { data, frame } = Rank1Data::deserialize(deserializer)?;
                let len = data.len();
                let data: [T; D] = data.try_into().map_err(|_| {
                    ::serde::de::Error::custom(format!("expected {} components, got {}", D, len))
                })?;
                Ok($ty::in_frame(data, frame))
            }
        }
    };
}

impl_serde_rank1!(Vector, "Vector");
impl_serde_rank1!(Point, "Point");

impl<T, const R: usize, const C: usize> ::serde::Serialize for Matrix<T, R, C>
where
    T: Float + ::serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ::serde::Serializer,
    {
        let data: Vec<T> = self.as_rows().iter().flatten().copied().collect();
        let mut state = serializer.serialize_struct("Matrix", 2)?;
        state.serialize_field("data", &data)?;
        state.serialize_field("shape", &[R, C])?;
        state.end()
    }
}

impl<'de, T, const R: usize, const C: usize> ::serde::Deserialize<'de> for Matrix<T, R, C>
where
    T: Float + ::serde::Deserialize<'de>,
{
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: ::serde::Deserializer<'de>,
    {
        let MatrixData { data, shape } = MatrixData::deserialize(deserializer)?;
        if shape != [R, C] {
            return Err(::serde::de::Error::custom("Invalid shape"));
        }
        Matrix::from_slice(&data).map_err(|e| ::serde::de::Error::custom(e))
    }
}
