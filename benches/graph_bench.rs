use criterion::*;
use dialog_rdf::{Graph, RdfService, Resource};

fn dialog_graph(size: usize) -> Graph {
  (0..size)
    .map(|i| Resource::typed(
      format!("http://localhost/resources/temp/{:07}", i),
      &[if i % 10 == 0 { "ns#Configuration" } else { "ns#Item" }],
    ))
    .collect()
}

pub fn lookups(c: &mut Criterion) {
  let mut service = RdfService::create("ns#");
  service.set_data(dialog_graph(1_000));
  let mut group = c.benchmark_group("graph_lookups");
  group.bench_function("find_by_type() over 1000 resources",
    |b| b.iter(|| service.find_by_type(black_box("Configuration")))
  );
  group.bench_function("find_by_uri() over 1000 resources",
    |b| b.iter(|| service.find_by_uri(black_box("http://localhost/resources/temp/0000999")))
  );
  group.bench_function("find_by_uri_containing() over 1000 resources",
    |b| b.iter(|| service.find_by_uri_containing(black_box("00009")))
  );
  group.finish();
}

pub fn create_objects(c: &mut Criterion) {
  c.bench_function("create_object() x100 into an empty graph",
    |b| b.iter(|| {
      let mut service = RdfService::create("ns#");
      for _ in 0..100 {
        service.create_object(black_box("Item")).map(|_| ()).unwrap();
      }
      service.take_data()
    })
  );
}

criterion_group!(benches, lookups, create_objects);
criterion_main!(benches);
