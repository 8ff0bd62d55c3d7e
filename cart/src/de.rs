// SPDX-License-Identifier: MPL-2.0

//! A deserializer for fixed-layout binary structures.
//!
//! Struct fields are read back to back with no padding. Multi-byte integers are little-endian, as
//! everything else on the Game Boy is. Only the types that fixed-layout structures are built from
//! (unsigned integers, arrays, tuples and structs) are supported.

use std::fmt;

use serde::de;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeserializeError {
    Message(String),
    ExpectedU8,
    ExpectedU16,
    ExpectedU32,
    Unsupported(&'static str),
}

impl de::Error for DeserializeError {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::Message(msg.to_string())
    }
}

impl de::StdError for DeserializeError {}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::ExpectedU8 => f.write_str("unexpected end of input; expected a byte"),
            Self::ExpectedU16 => f.write_str("unexpected end of input; expected a 16-bit integer"),
            Self::ExpectedU32 => f.write_str("unexpected end of input; expected a 32-bit integer"),
            Self::Unsupported(it) => write!(f, "`{}` is not supported by this format", it),
        }
    }
}

impl<'de> Deserializer<'de> {
    pub fn from_bytes(input: &'de [u8]) -> Self {
        Self { input }
    }
}

#[derive(Debug)]
pub struct Deserializer<'de> {
    input: &'de [u8],
}

impl<'de> Deserializer<'de> {
    /// The input not yet consumed.
    pub fn remaining(&self) -> &'de [u8] {
        self.input
    }
}

macro_rules! def_deserialize_unsupported {
    ($lt:lifetime $($fn:ident($($arg:ty),* $(,)?))*) => {
        $(
            fn $fn<V>(self, $(_: $arg,)* _: V) -> Result<V::Value, DeserializeError>
            where
                V: de::Visitor<$lt>,
            {
                Err(DeserializeError::Unsupported(stringify!($fn)))
            }
        )*
    };
}

macro_rules! def_deserialize_little_endian {
    (
        fn: $fn:ident<$lt:lifetime> -> Result<$ty:ty, $exp:ident $(,)?>,
        visit: $visit:ident $(,)?
    ) => {
        fn $fn<V>(self, visitor: V) -> Result<V::Value, DeserializeError>
        where
            V: de::Visitor<$lt>,
        {
            const TYPE_SIZE: usize = std::mem::size_of::<$ty>();

            let it = self.input
                .get(0..TYPE_SIZE)
                .and_then(|it| <[u8; TYPE_SIZE]>::try_from(it).ok())
                .map(<$ty>::from_le_bytes)
                .ok_or(DeserializeError::$exp)?;
            self.input = &self.input[TYPE_SIZE..];

            visitor.$visit(it)
        }
    };
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = DeserializeError;

    def_deserialize_unsupported! {
        'de
        deserialize_any()
        deserialize_bool()
        deserialize_i8()
        deserialize_i16()
        deserialize_i32()
        deserialize_i64()
        deserialize_u64()
        deserialize_f32()
        deserialize_f64()
        deserialize_char()
        deserialize_str()
        deserialize_string()
        deserialize_bytes()
        deserialize_byte_buf()
        deserialize_option()
        deserialize_unit()
        deserialize_tuple_struct(&'static str, usize)
        deserialize_enum(&'static str, &'static [&'static str])
        deserialize_unit_struct(&'static str)
        deserialize_newtype_struct(&'static str)
        deserialize_seq()
        deserialize_map()
        deserialize_identifier()
        deserialize_ignored_any()
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        let it = *self.input.first().ok_or(DeserializeError::ExpectedU8)?;
        self.input = &self.input[1..];

        visitor.visit_u8(it)
    }

    def_deserialize_little_endian! {
        fn: deserialize_u16<'de> -> Result<u16, ExpectedU16>,
        visit: visit_u16,
    }

    def_deserialize_little_endian! {
        fn: deserialize_u32<'de> -> Result<u32, ExpectedU32>,
        visit: visit_u32,
    }

    fn deserialize_struct<V>(
        self,
        _: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        // A struct is essentially a named tuple.
        de::Deserializer::deserialize_tuple(self, fields.len(), visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        struct Access<'a, 'de> {
            de: &'a mut Deserializer<'de>,
            len: usize,
        }

        impl<'de> de::SeqAccess<'de> for Access<'_, 'de> {
            type Error = DeserializeError;

            fn next_element_seed<T>(
                &mut self,
                seed: T,
            ) -> Result<Option<T::Value>, DeserializeError>
            where
                T: de::DeserializeSeed<'de>,
            {
                if self.len > 0 {
                    self.len -= 1;
                    let value = seed.deserialize(&mut *self.de)?;

                    Ok(Some(value))
                } else {
                    Ok(None)
                }
            }

            fn size_hint(&self) -> Option<usize> {
                Some(self.len)
            }
        }

        visitor.visit_seq(Access { de: self, len })
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}
