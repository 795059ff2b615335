// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec;
use alloc::vec::Vec;

use bytecheck::CheckBytes;
use rkyv::ser::serializers::{BufferScratch, BufferSerializer};
use rkyv::ser::Serializer;
use rkyv::validation::validators::DefaultValidator;
use rkyv::{
    check_archived_root, AlignedVec, Archive, Deserialize, Infallible,
    Serialize,
};

use crate::{
    ContractError, StandardBufSerializer, ARGBUF_LEN, SCRATCH_BUF_BYTES,
};

/// Serialize a value into its `rkyv` representation.
pub fn serialize_data<V>(value: &V) -> Result<Vec<u8>, ContractError>
where
    V: for<'a> Serialize<StandardBufSerializer<'a>>,
{
    let mut buf = vec![0u8; ARGBUF_LEN];
    let mut sbuf = [0u8; SCRATCH_BUF_BYTES];

    let ser = BufferSerializer::new(&mut buf[..]);
    let scratch = BufferScratch::new(&mut sbuf);

    let mut serializer = StandardBufSerializer::new(ser, scratch, Infallible);
    serializer
        .serialize_value(value)
        .map_err(|_| ContractError::Serialization)?;

    let pos = serializer.pos();
    buf.truncate(pos);

    Ok(buf)
}

/// Deserialize a value from its `rkyv` representation, checking the
/// integrity of the bytes first.
pub fn deserialize_data<T>(bytes: &[u8]) -> Result<T, ContractError>
where
    T: Archive,
    T::Archived: Deserialize<T, Infallible>
        + for<'b> CheckBytes<DefaultValidator<'b>>,
{
    // archived roots must be aligned, which an arbitrary slice isn't
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = check_archived_root::<T>(aligned.as_slice())
        .map_err(|_| ContractError::InvalidArgument)?;

    match archived.deserialize(&mut Infallible) {
        Ok(value) => Ok(value),
        Err(never) => match never {},
    }
}

/// Wrap a call with its respective (de)serializers.
/// Checks integrity of the arguments.
///
/// Returns the serialized return value of `f`.
pub fn wrap_call<A, R, F>(arg: &[u8], f: F) -> Result<Vec<u8>, ContractError>
where
    A: Archive,
    A::Archived: Deserialize<A, Infallible>
        + for<'b> CheckBytes<DefaultValidator<'b>>,
    R: for<'a> Serialize<StandardBufSerializer<'a>>,
    F: FnOnce(A) -> Result<R, ContractError>,
{
    let a = deserialize_data::<A>(arg)?;
    let ret = f(a)?;
    serialize_data(&ret)
}
