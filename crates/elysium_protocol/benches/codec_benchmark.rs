//! Encode/decode throughput over a dense object update - the message shape
//! that dominates region-to-viewer bandwidth.

use criterion::{criterion_group, criterion_main, Criterion};
use elysium_core::{Quaternion, Vec3};
use elysium_protocol::{
    schema_table, BlockValue, FieldValue, MessageCodec, MessageId, MessageValue,
};
use rand::Rng;
use std::hint::black_box;

fn dense_object_update(objects: usize) -> MessageValue {
    let mut rng = rand::thread_rng();
    let instances = (0..objects)
        .map(|i| {
            vec![
                FieldValue::U32(u32::try_from(i).unwrap()),
                FieldValue::U8(rng.gen()),
                FieldValue::Vec3(Vec3::new(rng.gen_range(0.0..256.0), rng.gen_range(0.0..256.0), rng.gen_range(0.0..128.0))),
                FieldValue::Vec3(Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0)),
                FieldValue::Rotation(
                    Quaternion::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
                        .normalized_wire_form(),
                ),
                FieldValue::Bytes(vec![0u8; rng.gen_range(0..32)]),
            ]
        })
        .collect();
    MessageValue::from_blocks(vec![
        BlockValue::single(vec![FieldValue::U64(rng.gen()), FieldValue::U16(65535)]),
        BlockValue::from_instances(instances),
    ])
}

fn codec_benchmark(c: &mut Criterion) {
    let schema = schema_table().get(MessageId::OBJECT_UPDATE).unwrap();
    let codec = MessageCodec::new(schema);
    let values = dense_object_update(40);
    let encoded = codec.encode(&values, &()).unwrap();

    c.bench_function("encode_object_update_40", |b| {
        b.iter(|| codec.encode(black_box(&values), &()).unwrap());
    });

    c.bench_function("decode_object_update_40", |b| {
        b.iter(|| codec.decode::<()>(black_box(&encoded)).unwrap());
    });

    c.bench_function("body_len_object_update_40", |b| {
        b.iter(|| codec.body_len(black_box(&values)));
    });
}

criterion_group!(benches, codec_benchmark);
criterion_main!(benches);
