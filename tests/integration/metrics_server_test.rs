use file_count_exporter::metrics::{Metric, MetricsServer, MetricsSink, PrometheusSink};
use file_count_exporter::ExporterError;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

fn scrape(addr: SocketAddr) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;
    Ok(response)
}

#[actix_web::test]
async fn test_server_serves_metrics_over_tcp() {
    let sink = PrometheusSink::new().unwrap();
    sink.set_gauge(Metric::EmptyFileCount, &["/srv/in", "inbox", "host"], 4.0)
        .unwrap();

    let server = MetricsServer::bind("127.0.0.1:0".parse().unwrap(), &sink).unwrap();
    let addr = server.local_addrs()[0];
    let handle = server.handle();
    actix_web::rt::spawn(server.run());

    let response = actix_web::rt::task::spawn_blocking(move || scrape(addr))
        .await
        .unwrap()
        .unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains(r#"empty_file_count{name="inbox",path="/srv/in",server="host"} 4"#));

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_bind_on_used_port_is_bind_error() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();
    let sink = PrometheusSink::new().unwrap();

    match MetricsServer::bind(addr, &sink) {
        Err(ExporterError::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("binding an occupied port should fail"),
    }
}
