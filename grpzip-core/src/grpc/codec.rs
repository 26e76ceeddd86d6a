use bytes::Buf as _;
use prost::Message as _;

/// tonic codec over `prost-reflect` dynamic messages: the request is
/// encoded as-is, the response is decoded against the method's output
/// descriptor.
#[derive(Clone)]
pub(super) struct DynamicCodec {
    output: prost_reflect::MessageDescriptor,
}

impl DynamicCodec {
    pub(super) fn new(output: prost_reflect::MessageDescriptor) -> Self {
        Self { output }
    }
}

impl tonic::codec::Codec for DynamicCodec {
    type Encode = prost_reflect::DynamicMessage;
    type Decode = prost_reflect::DynamicMessage;
    type Encoder = DynamicEncoder;
    type Decoder = DynamicDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        DynamicEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        DynamicDecoder {
            desc: self.output.clone(),
        }
    }
}

#[derive(Clone)]
pub(super) struct DynamicEncoder;

impl tonic::codec::Encoder for DynamicEncoder {
    type Item = prost_reflect::DynamicMessage;
    type Error = tonic::Status;

    fn encode(
        &mut self,
        item: Self::Item,
        dst: &mut tonic::codec::EncodeBuf<'_>,
    ) -> std::result::Result<(), Self::Error> {
        item.encode(dst)
            .map_err(|e| tonic::Status::internal(e.to_string()))?;
        Ok(())
    }
}

#[derive(Clone)]
pub(super) struct DynamicDecoder {
    desc: prost_reflect::MessageDescriptor,
}

impl tonic::codec::Decoder for DynamicDecoder {
    type Item = prost_reflect::DynamicMessage;
    type Error = tonic::Status;

    fn decode(
        &mut self,
        src: &mut tonic::codec::DecodeBuf<'_>,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        if !src.has_remaining() {
            return Ok(None);
        }

        let msg = prost_reflect::DynamicMessage::decode(self.desc.clone(), &mut *src)
            .map_err(|e| tonic::Status::internal(e.to_string()))?;

        Ok(Some(msg))
    }
}
